//! Sentence polarity scoring and sentiment bucketing

use crate::error::{NlpTasksError, Result};
use crate::processing::tokenizer::normalize_unicode;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

const DEFAULT_LEXICON: &str = include_str!("../../data/sentiment/lexicon.txt");

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;

const INCREMENTERS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "deeply", "enormously", "entirely",
    "especially", "exceptionally", "extremely", "fully", "greatly", "highly", "hugely",
    "incredibly", "intensely", "most", "particularly", "purely", "quite", "really",
    "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously", "truly",
    "utterly", "very",
];

const DECREMENTERS: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally", "occasionally", "partly",
    "scarcely", "slightly", "somewhat",
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "nowhere", "neither", "nor", "cannot",
    "without", "rarely", "seldom", "despite", "aint", "arent", "cant", "couldnt", "didnt",
    "doesnt", "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neednt",
    "shant", "shouldnt", "wasnt", "werent", "wont", "wouldnt",
];

/// Scores a single sentence.
pub trait PolarityScorer: Send + Sync {
    fn polarity_scores(&self, sentence: &str) -> PolarityScores;
}

/// Proportions of positive, negative and neutral content plus a normalized
/// overall score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
    pub compound: f64,
}

impl PolarityScores {
    pub fn new(pos: f64, neg: f64, neu: f64) -> Self {
        Self {
            pos,
            neg,
            neu,
            compound: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentimentBucket::Positive => "POSITIVE",
            SentimentBucket::Negative => "NEGATIVE",
            SentimentBucket::Neutral => "NEUTRAL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketThresholds {
    pub neutral: f64,
    pub positive: f64,
}

impl Default for BucketThresholds {
    fn default() -> Self {
        Self {
            neutral: 0.5,
            positive: 0.5,
        }
    }
}

/// Bucket a sentence by its scores. First match wins:
///
/// 1. `neu > thresholds.neutral` is neutral
/// 2. `pos > thresholds.positive` is positive
/// 3. everything else is negative
///
/// Rule 3 also catches mixed sentences where neither share clears its
/// threshold, even when the negative share is small.
pub fn classify(scores: &PolarityScores, thresholds: &BucketThresholds) -> SentimentBucket {
    if scores.neu > thresholds.neutral {
        SentimentBucket::Neutral
    } else if scores.pos > thresholds.positive {
        SentimentBucket::Positive
    } else {
        SentimentBucket::Negative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub text: String,
    pub scores: PolarityScores,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Sentences grouped by bucket, each list in text order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub positive: Vec<ScoredSentence>,
    pub negative: Vec<ScoredSentence>,
    pub neutral: Vec<ScoredSentence>,
}

impl SentimentReport {
    pub fn push(&mut self, bucket: SentimentBucket, sentence: ScoredSentence) {
        match bucket {
            SentimentBucket::Positive => self.positive.push(sentence),
            SentimentBucket::Negative => self.negative.push(sentence),
            SentimentBucket::Neutral => self.neutral.push(sentence),
        }
    }

    pub fn counts(&self) -> SentimentCounts {
        SentimentCounts {
            positive: self.positive.len(),
            negative: self.negative.len(),
            neutral: self.neutral.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.positive.len() + self.negative.len() + self.neutral.len()
    }

    pub fn sentences(&self, bucket: SentimentBucket) -> &[ScoredSentence] {
        match bucket {
            SentimentBucket::Positive => &self.positive,
            SentimentBucket::Negative => &self.negative,
            SentimentBucket::Neutral => &self.neutral,
        }
    }
}

/// Lexicon and rule based intensity scorer in the style of VADER.
///
/// Word valences come from the lexicon and are adjusted by booster words,
/// ALL-CAPS emphasis, negation in the three preceding words, a contrastive
/// "but" and trailing `!`/`?` marks.
pub struct SentimentIntensityAnalyzer {
    lexicon: HashMap<String, f64>,
    incrementers: HashSet<&'static str>,
    decrementers: HashSet<&'static str>,
    negators: HashSet<&'static str>,
}

impl Default for SentimentIntensityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentIntensityAnalyzer {
    pub fn new() -> Self {
        Self::with_lexicon(parse_lexicon(DEFAULT_LEXICON))
    }

    pub fn with_lexicon(lexicon: HashMap<String, f64>) -> Self {
        Self {
            lexicon,
            incrementers: INCREMENTERS.iter().copied().collect(),
            decrementers: DECREMENTERS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    /// Load a `word<TAB>valence[<TAB>...]` lexicon file.
    pub fn from_lexicon_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NlpTasksError::resource_unavailable(format!("sentiment lexicon {}", path.display()), e)
        })?;
        let lexicon = parse_lexicon(&content);
        if lexicon.is_empty() {
            return Err(NlpTasksError::resource_unavailable(
                format!("sentiment lexicon {}", path.display()),
                "no valid entries",
            ));
        }
        info!("Loaded {} sentiment entries from {}", lexicon.len(), path.display());
        Ok(Self::with_lexicon(lexicon))
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    fn is_negated(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.negators.contains(lower.as_str()) || lower.ends_with("n't")
    }

    fn booster_scalar(&self, word: &str, valence: f64, caps_differ: bool) -> f64 {
        let lower = word.to_lowercase();
        let mut scalar = if self.incrementers.contains(lower.as_str()) {
            BOOSTER_INCREMENT
        } else if self.decrementers.contains(lower.as_str()) {
            BOOSTER_DECREMENT
        } else {
            return 0.0;
        };

        if valence < 0.0 {
            scalar = -scalar;
        }
        if is_all_caps(word) && caps_differ {
            scalar += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
        }
        scalar
    }

    fn word_valence(&self, words: &[&str], index: usize, caps_differ: bool) -> f64 {
        let word = words[index];
        let lower = word.to_lowercase();

        if self.incrementers.contains(lower.as_str()) || self.decrementers.contains(lower.as_str()) {
            return 0.0;
        }
        let Some(&base) = self.lexicon.get(&lower) else {
            return 0.0;
        };

        let mut valence = base;
        if is_all_caps(word) && caps_differ {
            valence += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
        }

        for distance in 1..=3 {
            if index < distance {
                break;
            }
            let previous = words[index - distance];
            if self.lexicon.contains_key(&previous.to_lowercase()) {
                continue;
            }

            let mut scalar = self.booster_scalar(previous, valence, caps_differ);
            match distance {
                2 => scalar *= 0.95,
                3 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;

            if self.is_negated(previous) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl PolarityScorer for SentimentIntensityAnalyzer {
    fn polarity_scores(&self, sentence: &str) -> PolarityScores {
        let sentence = normalize_unicode(sentence);
        let words: Vec<&str> = sentence
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| w.chars().count() > 1)
            .collect();

        if words.is_empty() {
            return PolarityScores::default();
        }

        let caps_differ = {
            let caps = words.iter().filter(|w| is_all_caps(w)).count();
            caps > 0 && caps < words.len()
        };

        let mut sentiments: Vec<f64> = (0..words.len())
            .map(|i| self.word_valence(&words, i, caps_differ))
            .collect();

        if let Some(but_index) = words.iter().position(|w| w.eq_ignore_ascii_case("but")) {
            for (i, valence) in sentiments.iter_mut().enumerate() {
                if i < but_index {
                    *valence *= 0.5;
                } else if i > but_index {
                    *valence *= 1.5;
                }
            }
        }

        score_valence(&sentiments, &sentence)
    }
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    let punctuation = punctuation_emphasis(text);

    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += punctuation;
    } else if sum < 0.0 {
        sum -= punctuation;
    }
    let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &valence in sentiments {
        if valence > 0.0 {
            positive += valence + 1.0;
        } else if valence < 0.0 {
            negative += valence - 1.0;
        } else {
            neutral += 1.0;
        }
    }

    if positive > negative.abs() {
        positive += punctuation;
    } else if positive < negative.abs() {
        negative -= punctuation;
    }

    let total = positive + negative.abs() + neutral;
    if total == 0.0 {
        return PolarityScores::default();
    }

    PolarityScores {
        pos: round3((positive / total).abs()),
        neg: round3((negative / total).abs()),
        neu: round3((neutral / total).abs()),
        compound: round4(compound),
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n if n <= 3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}

fn parse_lexicon(content: &str) -> HashMap<String, f64> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let word = fields.next()?.trim();
            let valence = fields.next()?.trim().parse::<f64>().ok()?;
            (!word.is_empty()).then(|| (word.to_lowercase(), valence))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_classify_positive() {
        let scores = PolarityScores::new(0.6, 0.1, 0.3);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Positive
        );
    }

    #[test]
    fn test_classify_ambiguous_falls_through_to_negative() {
        let scores = PolarityScores::new(0.4, 0.4, 0.2);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Negative
        );

        // Low negative share still lands in the negative bucket
        let scores = PolarityScores::new(0.45, 0.1, 0.45);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Negative
        );
    }

    #[test]
    fn test_classify_neutral_checked_first() {
        let scores = PolarityScores::new(0.0, 0.0, 1.0);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Neutral
        );
        // Thresholds are strict
        let scores = PolarityScores::new(0.5, 0.0, 0.5);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Negative
        );
    }

    #[test]
    fn test_positive_sentence() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("I love this great product!");
        assert!(scores.pos > 0.5, "{:?}", scores);
        assert_eq!(scores.neg, 0.0);
        assert!(scores.compound > 0.5);
    }

    #[test]
    fn test_negative_sentence() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("This is terrible and awful.");
        assert!(scores.neg > scores.pos);
        assert!(scores.compound < 0.0);
        assert_eq!(
            classify(&scores, &BucketThresholds::default()),
            SentimentBucket::Negative
        );
    }

    #[test]
    fn test_neutral_sentence() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("The meeting is at noon.");
        assert_eq!(scores.neu, 1.0);
        assert_eq!(scores.compound, 0.0);
    }

    #[test]
    fn test_negation_flips() {
        let analyzer = SentimentIntensityAnalyzer::new();
        assert!(analyzer.polarity_scores("good").compound > 0.0);
        assert!(analyzer.polarity_scores("not good").compound < 0.0);
        assert!(analyzer.polarity_scores("isn't good").compound < 0.0);
    }

    #[test]
    fn test_curly_apostrophe_negation() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let straight = analyzer.polarity_scores("This isn't good.");
        let curly = analyzer.polarity_scores("This isn\u{2019}t good.");

        assert_eq!(curly, straight);
        assert_eq!(
            classify(&curly, &BucketThresholds::default()),
            SentimentBucket::Negative
        );
    }

    #[test]
    fn test_booster_and_caps_intensify() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let plain = analyzer.polarity_scores("the food was good").compound;
        let boosted = analyzer.polarity_scores("the food was very good").compound;
        let shouted = analyzer.polarity_scores("the food was GOOD").compound;
        assert!(boosted > plain);
        assert!(shouted > plain);
    }

    #[test]
    fn test_but_shifts_weight() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("the food was good but the service was terrible");
        assert!(scores.compound < 0.0);
    }

    #[test]
    fn test_empty_sentence_scores_zero() {
        let analyzer = SentimentIntensityAnalyzer::new();
        assert_eq!(analyzer.polarity_scores(""), PolarityScores::default());
        assert_eq!(analyzer.polarity_scores("! ?"), PolarityScores::default());
    }

    #[test]
    fn test_shares_sum_to_one() {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores("The movie was great, but the ending was sad!");
        let sum = scores.pos + scores.neg + scores.neu;
        assert!((sum - 1.0).abs() < 0.01, "{:?}", scores);
    }

    #[test]
    fn test_report_counts() {
        let mut report = SentimentReport::default();
        let sentence = |text: &str| ScoredSentence {
            text: text.to_string(),
            scores: PolarityScores::default(),
        };
        report.push(SentimentBucket::Positive, sentence("a"));
        report.push(SentimentBucket::Neutral, sentence("b"));
        report.push(SentimentBucket::Neutral, sentence("c"));

        assert_eq!(
            report.counts(),
            SentimentCounts {
                positive: 1,
                negative: 0,
                neutral: 2
            }
        );
        assert_eq!(report.total(), 3);
        assert_eq!(report.sentences(SentimentBucket::Neutral)[1].text, "c");
    }

    #[test]
    fn test_lexicon_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "zorp\t2.5\t0.5\t[2, 3]\nbroken line").unwrap();

        let analyzer = SentimentIntensityAnalyzer::from_lexicon_file(file.path()).unwrap();
        assert_eq!(analyzer.lexicon_size(), 1);
        assert!(analyzer.polarity_scores("zorp").compound > 0.0);
    }

    #[test]
    fn test_empty_lexicon_file_rejected() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            SentimentIntensityAnalyzer::from_lexicon_file(file.path()),
            Err(NlpTasksError::ResourceUnavailable { .. })
        ));
    }
}
