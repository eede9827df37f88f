//! The preprocessing pipeline over injected linguistic resources

use crate::config::Config;
use crate::error::Result;
use crate::processing::freq_dist::FreqDist;
use crate::processing::lemmatizer::{Lemmatizer, WordNetLemmatizer};
use crate::processing::pos_tagger::{PosTagger, RuleBasedTagger};
use crate::processing::sentiment::{
    classify, BucketThresholds, PolarityScorer, ScoredSentence, SentimentIntensityAnalyzer,
    SentimentReport,
};
use crate::processing::stopwords::StopwordSet;
use crate::processing::tag_normalizer::wordnet_pos;
use crate::processing::tokenizer::{
    SentenceSplitter, TreebankWordTokenizer, UnicodeSentenceSplitter, WordTokenizer,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shared linguistic services, loaded once and read-only afterwards.
///
/// Every service is `Send + Sync` and never mutated after construction, so a
/// single instance can be shared by reference between threads.
pub struct LinguisticResources {
    pub word_tokenizer: Box<dyn WordTokenizer>,
    pub sentence_splitter: Box<dyn SentenceSplitter>,
    pub stopwords: StopwordSet,
    pub tagger: Box<dyn PosTagger>,
    pub lemmatizer: Box<dyn Lemmatizer>,
    pub scorer: Box<dyn PolarityScorer>,
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self {
            word_tokenizer: Box::new(TreebankWordTokenizer::new()),
            sentence_splitter: Box::new(UnicodeSentenceSplitter),
            stopwords: StopwordSet::english(),
            tagger: Box::new(RuleBasedTagger::new()),
            lemmatizer: Box::new(WordNetLemmatizer::embedded()),
            scorer: Box::new(SentimentIntensityAnalyzer::new()),
        }
    }
}

impl LinguisticResources {
    /// Build the resources a config asks for. Any configured file that cannot
    /// be loaded fails here, before any text is processed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let res = &config.resources;

        let mut stopwords = match &res.stopwords_path {
            Some(path) => StopwordSet::from_file(path)?,
            None => StopwordSet::english(),
        };
        stopwords.extend(&res.extra_stopwords);

        let rule_tagger = match &res.tagger_lexicon_path {
            Some(path) => RuleBasedTagger::new().with_lexicon_file(path)?,
            None => RuleBasedTagger::new(),
        };
        let tagger_entries = rule_tagger.lexicon_size();
        let tagger = build_tagger(res.nlprule_tokenizer_path.as_deref(), rule_tagger)?;

        let lemmatizer = match &res.wordnet_dir {
            Some(dir) => WordNetLemmatizer::from_dict_dir(dir)?,
            None => WordNetLemmatizer::embedded(),
        };

        let scorer = match &res.sentiment_lexicon_path {
            Some(path) => SentimentIntensityAnalyzer::from_lexicon_file(path)?,
            None => SentimentIntensityAnalyzer::new(),
        };

        info!(
            "Linguistic resources ready: {} stopwords, {} tagger entries, {} sentiment entries",
            stopwords.len(),
            tagger_entries,
            scorer.lexicon_size()
        );

        Ok(Self {
            word_tokenizer: Box::new(TreebankWordTokenizer::new()),
            sentence_splitter: Box::new(UnicodeSentenceSplitter),
            stopwords,
            tagger,
            lemmatizer: Box::new(lemmatizer),
            scorer: Box::new(scorer),
        })
    }
}

#[cfg(feature = "nlprule")]
fn build_tagger(nlprule_path: Option<&Path>, rule_tagger: RuleBasedTagger) -> Result<Box<dyn PosTagger>> {
    use crate::processing::nlprule_tagger::NlpruleTagger;

    let tagger: Box<dyn PosTagger> = match nlprule_path {
        Some(path) => Box::new(NlpruleTagger::from_file(path)?.with_fallback(rule_tagger)),
        None => Box::new(rule_tagger),
    };
    Ok(tagger)
}

#[cfg(not(feature = "nlprule"))]
fn build_tagger(nlprule_path: Option<&Path>, rule_tagger: RuleBasedTagger) -> Result<Box<dyn PosTagger>> {
    match nlprule_path {
        Some(path) => Err(crate::error::NlpTasksError::Configuration(format!(
            "resources.nlprule_tokenizer_path is set to {} but nlp-tasks was built without the `nlprule` feature",
            path.display()
        ))),
        None => Ok(Box::new(rule_tagger)),
    }
}

/// Everything the pipeline produces for one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub tokens: Vec<String>,
    pub tagged: Vec<(String, String)>,
    pub lemmas: Vec<String>,
    pub frequencies: Vec<(String, usize)>,
    pub sentiment: SentimentReport,
}

pub struct Preprocessor {
    resources: LinguisticResources,
    min_token_chars: usize,
    thresholds: BucketThresholds,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(LinguisticResources::default())
    }
}

impl Preprocessor {
    pub fn new(resources: LinguisticResources) -> Self {
        Self {
            resources,
            min_token_chars: 2,
            thresholds: BucketThresholds::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let resources = LinguisticResources::from_config(config)?;
        Ok(Self::new(resources)
            .with_min_token_chars(config.processing.min_token_chars)
            .with_thresholds(BucketThresholds {
                neutral: config.sentiment.neutral_threshold,
                positive: config.sentiment.positive_threshold,
            }))
    }

    pub fn with_min_token_chars(mut self, min_token_chars: usize) -> Self {
        self.min_token_chars = min_token_chars;
        self
    }

    pub fn with_thresholds(mut self, thresholds: BucketThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn resources(&self) -> &LinguisticResources {
        &self.resources
    }

    /// Word-tokenize, drop short words, lowercase, drop stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = self
            .resources
            .word_tokenizer
            .tokenize_words(text)
            .into_iter()
            .filter(|word| word.chars().count() >= self.min_token_chars)
            .map(|word| word.to_lowercase())
            .filter(|word| !self.resources.stopwords.contains(word))
            .collect();

        debug!("Tokenized {} chars into {} tokens", text.len(), tokens.len());
        tokens
    }

    /// Tag each token with a treebank part of speech.
    pub fn get_pos(&self, tokens: &[String]) -> Vec<(String, String)> {
        self.resources.tagger.tag(tokens)
    }

    /// Base form of each tagged word. Tags that do not map to a word class
    /// use the lemmatizer's default mode.
    pub fn lemmatize(&self, tagged_words: &[(String, String)]) -> Vec<String> {
        tagged_words
            .iter()
            .map(|(word, tag)| self.resources.lemmatizer.lemmatize(word, wordnet_pos(tag)))
            .collect()
    }

    /// The `top_n` most common tokens by descending count, ties first-seen-first.
    ///
    /// `top_n == 0` or an empty token list gives an empty vector; neither is an error.
    pub fn get_distfreq(&self, tokens: &[String], top_n: usize) -> Vec<(String, usize)> {
        FreqDist::from_tokens(tokens).most_common(top_n)
    }

    /// Score every sentence and group them into positive, negative and neutral.
    pub fn sentiment_analysis(&self, text: &str) -> SentimentReport {
        let mut report = SentimentReport::default();

        for sentence in self.resources.sentence_splitter.split_sentences(text) {
            let scores = self.resources.scorer.polarity_scores(&sentence);
            let bucket = classify(&scores, &self.thresholds);
            debug!("{} {:?}: {}", bucket, scores, sentence);
            report.push(bucket, ScoredSentence { text: sentence, scores });
        }

        report
    }

    pub fn analyze(&self, text: &str, top_n: usize) -> TextAnalysis {
        let tokens = self.tokenize(text);
        let tagged = self.get_pos(&tokens);
        let lemmas = self.lemmatize(&tagged);
        let frequencies = self.get_distfreq(&lemmas, top_n);
        let sentiment = self.sentiment_analysis(text);

        TextAnalysis {
            tokens,
            tagged,
            lemmas,
            frequencies,
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sentiment::SentimentCounts;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize_filters() {
        let preprocessor = Preprocessor::default();
        let tokens = preprocessor.tokenize("The Quick brown fox is jumping over a lazy dog, isn't it?");

        assert_eq!(tokens, strings(&["quick", "brown", "fox", "jumping", "lazy", "dog", "n't"]));
        for token in &tokens {
            assert!(token.chars().count() >= 2);
            assert_eq!(token, &token.to_lowercase());
            assert!(!preprocessor.resources().stopwords.contains(token));
        }
    }

    #[test]
    fn test_tokenize_empty() {
        let preprocessor = Preprocessor::default();
        assert!(preprocessor.tokenize("").is_empty());
        assert!(preprocessor.tokenize("a I . , !").is_empty());
    }

    #[test]
    fn test_tokenize_idempotent() {
        let preprocessor = Preprocessor::default();
        let text = "quick brown fox jumping lazy dog";
        let tokens = preprocessor.tokenize(text);
        assert_eq!(tokens.join(" "), text);
        assert_eq!(preprocessor.tokenize(&tokens.join(" ")), tokens);
    }

    #[test]
    fn test_lemmatize_sample() {
        let preprocessor = Preprocessor::default();
        let tagged = vec![
            ("continues".to_string(), "VBZ".to_string()),
            ("continuation".to_string(), "NN".to_string()),
        ];
        assert_eq!(
            preprocessor.lemmatize(&tagged),
            strings(&["continue", "continuation"])
        );
    }

    #[test]
    fn test_lemmatize_unspecified_tag_uses_default_mode() {
        let preprocessor = Preprocessor::default();
        let tagged = vec![
            ("dogs".to_string(), "".to_string()),
            ("running".to_string(), "IN".to_string()),
        ];
        assert_eq!(preprocessor.lemmatize(&tagged), strings(&["dog", "running"]));
    }

    #[test]
    fn test_irregular_past_tense_lemmas() {
        let preprocessor = Preprocessor::default();
        let tokens = preprocessor.tokenize(
            "She sang songs and bought bread. He drove home, ate lunch and flew kites while prices rose.",
        );
        let lemmas = preprocessor.lemmatize(&preprocessor.get_pos(&tokens));

        assert_eq!(
            lemmas,
            strings(&[
                "sing", "song", "buy", "bread", "drive", "home", "eat", "lunch", "fly", "kite",
                "price", "rise"
            ])
        );
    }

    #[test]
    fn test_lemmatize_everyday_vocabulary() {
        let preprocessor = Preprocessor::default();
        let tokens = preprocessor.tokenize("The company announced layoffs. Shareholders acquired rivals.");
        let lemmas = preprocessor.lemmatize(&preprocessor.get_pos(&tokens));

        assert_eq!(
            lemmas,
            strings(&["company", "announce", "layoff", "shareholder", "acquire", "rival"])
        );
    }

    #[test]
    fn test_get_distfreq() {
        let preprocessor = Preprocessor::default();
        let tokens = strings(&["a", "b", "a", "c", "a", "b"]);
        assert_eq!(
            preprocessor.get_distfreq(&tokens, 2),
            vec![("a".to_string(), 3), ("b".to_string(), 2)]
        );
        assert!(preprocessor.get_distfreq(&tokens, 0).is_empty());
        assert!(preprocessor.get_distfreq(&[], 3).is_empty());
    }

    #[test]
    fn test_sentiment_analysis() {
        let preprocessor = Preprocessor::default();
        let report = preprocessor.sentiment_analysis(
            "I love this wonderful library! The build failed and the docs are terrible. The file has ten lines.",
        );

        assert_eq!(
            report.counts(),
            SentimentCounts {
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
        assert_eq!(report.positive[0].text, "I love this wonderful library!");
        assert_eq!(report.neutral[0].text, "The file has ten lines.");
    }

    #[test]
    fn test_sentiment_empty_text() {
        let preprocessor = Preprocessor::default();
        assert_eq!(preprocessor.sentiment_analysis("").total(), 0);
    }

    #[test]
    fn test_analyze_runs_all_stages() {
        let preprocessor = Preprocessor::default();
        let analysis = preprocessor.analyze("Dogs were running. The dogs continued running!", 2);

        assert_eq!(analysis.tokens.len(), analysis.tagged.len());
        assert_eq!(analysis.tokens.len(), analysis.lemmas.len());
        assert_eq!(analysis.frequencies[0], ("dog".to_string(), 2));
        assert_eq!(analysis.sentiment.total(), 2);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_preprocessor_is_send_and_sync() {
        assert_send_sync::<Preprocessor>();
        assert_send_sync::<LinguisticResources>();
    }

    #[test]
    fn test_shared_across_threads() {
        let preprocessor = Preprocessor::default();
        let text = "Dogs were running. The dogs continued running!";
        let expected = preprocessor.analyze(text, 3);

        let (first, second) = std::thread::scope(|scope| {
            let first = scope.spawn(|| preprocessor.analyze(text, 3));
            let second = scope.spawn(|| preprocessor.analyze(text, 3));
            (first.join().unwrap(), second.join().unwrap())
        });

        for analysis in [first, second] {
            assert_eq!(analysis.tokens, expected.tokens);
            assert_eq!(analysis.lemmas, expected.lemmas);
            assert_eq!(analysis.frequencies, expected.frequencies);
            assert_eq!(analysis.sentiment.counts(), expected.sentiment.counts());
        }
    }

    #[cfg(not(feature = "nlprule"))]
    #[test]
    fn test_nlprule_path_needs_feature() {
        let mut config = Config::default();
        config.resources.nlprule_tokenizer_path = Some("en_tokenizer.bin".into());

        let result = Preprocessor::from_config(&config);
        assert!(matches!(
            result,
            Err(crate::error::NlpTasksError::Configuration(_))
        ));
    }

    #[test]
    fn test_custom_thresholds() {
        let preprocessor = Preprocessor::default().with_thresholds(BucketThresholds {
            neutral: 1.0,
            positive: 1.0,
        });
        let report = preprocessor.sentiment_analysis("The meeting is at noon.");
        assert_eq!(report.counts().negative, 1);
    }
}
