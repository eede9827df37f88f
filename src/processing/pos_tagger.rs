//! Part-of-speech tagging with Penn-Treebank tags

use crate::error::{NlpTasksError, Result};
use crate::processing::lemmatizer::detachment_rules;
use crate::processing::tag_normalizer::WordNetPos;
use log::info;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_LEXICON: &str = include_str!("../../data/tagger/lexicon.txt");
const WORD_CLASSES: &str = include_str!("../../data/tagger/word_classes.txt");
const IRREGULAR_VERBS: &str = include_str!("../../data/irregular_verbs.txt");

/// Assigns a treebank tag to every token, keeping order and length.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagSource {
    /// Closed-class lexicon, numbers and punctuation
    Lexicon,
    /// The word belongs to a single word class
    Dictionary,
    /// Ambiguous or guessed; neighbours may override
    Guess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IrregularForm {
    Past,
    Participle,
    PastOrParticiple,
}

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve"];
const BE_FORMS: &[&str] = &["be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re"];
const NOMINAL_CONTEXT: &[&str] = &["DT", "PRP$", "JJ", "POS"];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ance", "ence", "ship", "hood", "ist", "age",
    "ure", "er", "or",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ary", "ical", "al", "ic", "ant", "ent",
];

/// Lexicon and dictionary tagger with a left-to-right pass of contextual
/// corrections from the previous tag.
///
/// Closed-class words come from a hand-kept lexicon. Irregular verb forms come
/// from a base/past/participle table. Regular inflections are recognised when
/// stripping the suffix yields a dictionary word of the right class, and
/// uninflected words take their most common class from the dictionary.
/// Anything left is guessed from its shape and suffix, defaulting to `NN`.
pub struct RuleBasedTagger {
    lexicon: HashMap<String, String>,
    classes: HashMap<String, Vec<WordNetPos>>,
    irregular: HashMap<String, IrregularForm>,
    number_regex: Regex,
}

impl Default for RuleBasedTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedTagger {
    pub fn new() -> Self {
        let number_regex = Regex::new(r"^[+-]?\d+(?:[.,]\d+)*%?$").expect("Invalid number regex");

        Self {
            lexicon: parse_lexicon(DEFAULT_LEXICON),
            classes: parse_word_classes(WORD_CLASSES),
            irregular: parse_irregular_verbs(IRREGULAR_VERBS),
            number_regex,
        }
    }

    /// Add entries from a `word TAG` file on top of the built-in lexicon.
    pub fn with_lexicon_file(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NlpTasksError::resource_unavailable(format!("tagger lexicon {}", path.display()), e)
        })?;
        let entries = parse_lexicon(&content);
        info!("Loaded {} tagger entries from {}", entries.len(), path.display());
        self.lexicon.extend(entries);
        Ok(self)
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len() + self.classes.len()
    }

    fn has_class(&self, word: &str, pos: WordNetPos) -> bool {
        self.classes.get(word).is_some_and(|classes| classes.contains(&pos))
    }

    /// True when removing an inflectional suffix from `word` leaves a
    /// dictionary word of class `pos`. Doubled final consonants are undone
    /// (`stopped` -> `stop`).
    fn has_base(&self, word: &str, pos: WordNetPos) -> bool {
        detachment_rules(pos).iter().any(|(suffix, ending)| {
            let Some(stem) = word.strip_suffix(suffix) else {
                return false;
            };
            if stem.is_empty() {
                return false;
            }
            let base = format!("{}{}", stem, ending);
            if base != word && self.has_class(&base, pos) {
                return true;
            }
            ending.is_empty() && undouble(stem).is_some_and(|s| self.has_class(s, pos))
        })
    }

    fn initial_tag(&self, token: &str, position: usize) -> (String, TagSource) {
        let lower = token.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return (tag.clone(), TagSource::Lexicon);
        }
        if self.number_regex.is_match(&lower) {
            return ("CD".to_string(), TagSource::Lexicon);
        }
        if !lower.chars().any(char::is_alphanumeric) {
            return (punctuation_tag(&lower).to_string(), TagSource::Lexicon);
        }
        if position > 0 && token.chars().next().is_some_and(char::is_uppercase) {
            return ("NNP".to_string(), TagSource::Guess);
        }

        if let Some(form) = self.irregular.get(&lower) {
            let tag = match form {
                IrregularForm::Participle => "VBN",
                IrregularForm::Past | IrregularForm::PastOrParticiple => "VBD",
            };
            return (tag.to_string(), TagSource::Guess);
        }

        if let Some(tagged) = self.inflected_tag(&lower) {
            return tagged;
        }
        if let Some(tagged) = self.dictionary_tag(&lower) {
            return tagged;
        }

        (guess_tag(&lower).to_string(), TagSource::Guess)
    }

    fn inflected_tag(&self, lower: &str) -> Option<(String, TagSource)> {
        let len = lower.chars().count();
        let tagged = |tag: &str, source| Some((tag.to_string(), source));

        if len > 4 && lower.ends_with("ing") && self.has_base(lower, WordNetPos::Verb) {
            return tagged("VBG", TagSource::Guess);
        }
        if len > 3 && lower.ends_with("ed") && self.has_base(lower, WordNetPos::Verb) {
            return tagged("VBD", TagSource::Guess);
        }
        if len > 2 && lower.ends_with('s') && !lower.ends_with("ss") {
            let noun = self.has_base(lower, WordNetPos::Noun);
            let verb = self.has_base(lower, WordNetPos::Verb);
            match (noun, verb) {
                (true, false) => return tagged("NNS", TagSource::Dictionary),
                (true, true) => return tagged("NNS", TagSource::Guess),
                (false, true) => return tagged("VBZ", TagSource::Guess),
                (false, false) => {}
            }
        }
        if let Some(stem) = lower.strip_suffix("iest") {
            if self.has_class(&format!("{}y", stem), WordNetPos::Adjective) {
                return tagged("JJS", TagSource::Dictionary);
            }
        }
        if let Some(stem) = lower.strip_suffix("ier") {
            if self.has_class(&format!("{}y", stem), WordNetPos::Adjective) {
                return tagged("JJR", TagSource::Guess);
            }
        }
        if len > 4 && lower.ends_with("est") && self.has_base(lower, WordNetPos::Adjective) {
            return tagged("JJS", TagSource::Dictionary);
        }
        if len > 3 && lower.ends_with("er") && self.has_base(lower, WordNetPos::Adjective) {
            return tagged("JJR", TagSource::Guess);
        }
        None
    }

    fn dictionary_tag(&self, lower: &str) -> Option<(String, TagSource)> {
        let classes = self.classes.get(lower)?;
        let primary = classes.first()?;
        let tag = match primary {
            WordNetPos::Noun => "NN",
            WordNetPos::Verb => "VB",
            WordNetPos::Adjective => "JJ",
            WordNetPos::Adverb => "RB",
        };
        let source = if classes.len() == 1 {
            TagSource::Dictionary
        } else {
            TagSource::Guess
        };
        Some((tag.to_string(), source))
    }

    fn contextual_tag(
        &self,
        word: &str,
        prev_word: &str,
        prev_tag: &str,
        tag: String,
        source: TagSource,
    ) -> String {
        let guessed = source == TagSource::Guess;
        let corrected = match (prev_tag, tag.as_str()) {
            ("MD" | "TO", "NN" | "VBP") if guessed || tag == "VBP" => Some("VB"),
            (_, "VBD") if HAVE_FORMS.contains(&prev_word) || BE_FORMS.contains(&prev_word) => {
                Some("VBN")
            }
            ("NN" | "NNP" | "PRP" | "WP", "NNS") if guessed => Some("VBZ"),
            (prev, "VBZ") if guessed && NOMINAL_CONTEXT.contains(&prev) => Some("NNS"),
            (prev, "VB" | "VBD")
                if guessed
                    && NOMINAL_CONTEXT.contains(&prev)
                    && self.has_class(word, WordNetPos::Noun) =>
            {
                Some("NN")
            }
            ("PRP", "NN") if guessed && self.has_class(word, WordNetPos::Verb) => Some("VBP"),
            _ => None,
        };

        corrected.map(str::to_string).unwrap_or(tag)
    }
}

impl PosTagger for RuleBasedTagger {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        let mut tagged: Vec<(String, String)> = Vec::with_capacity(tokens.len());
        let mut previous: Option<(String, String)> = None;

        for (position, token) in tokens.iter().enumerate() {
            let (mut tag, source) = self.initial_tag(token, position);

            if let Some((prev_word, prev_tag)) = &previous {
                tag = self.contextual_tag(
                    &token.to_lowercase(),
                    &prev_word.to_lowercase(),
                    prev_tag,
                    tag,
                    source,
                );
            }

            previous = Some((token.clone(), tag.clone()));
            tagged.push((token.clone(), tag));
        }

        tagged
    }
}

/// `stopp` -> `stop`, `runn` -> `run`
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last == before && !"aeiou".contains(last) {
        Some(&stem[..stem.len() - last.len_utf8()])
    } else {
        None
    }
}

fn guess_tag(lower: &str) -> &'static str {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && lower.ends_with("ed") {
        return "VBD";
    }
    if len > 3 && lower.ends_with("ly") {
        return "RB";
    }
    if len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return "NNS";
    }
    if len > 4 && lower.ends_with("est") {
        return "JJS";
    }
    if NOUN_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return "NN";
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| len > s.len() + 2 && lower.ends_with(s)) {
        return "JJ";
    }
    "NN"
}

fn punctuation_tag(token: &str) -> &'static str {
    match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "``" => "``",
        "''" => "''",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    }
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn parse_lexicon(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter(|line| !is_comment(line))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(word), Some(tag)) => Some((word.to_lowercase(), tag.to_string())),
                _ => None,
            }
        })
        .collect()
}

/// `word NVJ`: classes in order of frequency
fn parse_word_classes(content: &str) -> HashMap<String, Vec<WordNetPos>> {
    content
        .lines()
        .filter(|line| !is_comment(line))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let word = fields.next()?;
            let classes: Vec<WordNetPos> = fields
                .next()?
                .chars()
                .filter_map(|c| match c {
                    'N' => Some(WordNetPos::Noun),
                    'V' => Some(WordNetPos::Verb),
                    'J' => Some(WordNetPos::Adjective),
                    'R' => Some(WordNetPos::Adverb),
                    _ => None,
                })
                .collect();
            Some((word.to_string(), classes))
        })
        .collect()
}

/// `base past participle`, alternatives separated by `/`
fn parse_irregular_verbs(content: &str) -> HashMap<String, IrregularForm> {
    let mut forms = HashMap::new();
    for line in content.lines().filter(|line| !is_comment(line)) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[base, past, participle] = fields.as_slice() else {
            continue;
        };

        for form in past.split('/').filter(|f| *f != base) {
            forms.insert(form.to_string(), IrregularForm::Past);
        }
        for form in participle.split('/').filter(|f| *f != base) {
            forms
                .entry(form.to_string())
                .and_modify(|existing| {
                    if *existing == IrregularForm::Past {
                        *existing = IrregularForm::PastOrParticiple;
                    }
                })
                .or_insert(IrregularForm::Participle);
        }
    }
    forms
}
