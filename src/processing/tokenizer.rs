//! Word and sentence tokenization

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Splits raw text into word tokens. Punctuation is returned as separate tokens.
pub trait WordTokenizer: Send + Sync {
    fn tokenize_words(&self, text: &str) -> Vec<String>;
}

/// Splits raw text into sentences.
pub trait SentenceSplitter: Send + Sync {
    fn split_sentences(&self, text: &str) -> Vec<String>;
}

/// Treebank-style word tokenizer over Unicode word boundaries.
///
/// Clitics are split off the way the Penn Treebank does it:
/// `don't` becomes `do` + `n't`, `she'll` becomes `she` + `'ll`.
pub struct TreebankWordTokenizer {
    clitic_regex: Regex,
}

impl Default for TreebankWordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreebankWordTokenizer {
    pub fn new() -> Self {
        let clitic_regex = Regex::new(r"(?i)^(.+?)(n't|'s|'re|'ve|'ll|'d|'m)$")
            .expect("Invalid clitic regex");
        Self { clitic_regex }
    }

    fn push_segment(&self, segment: &str, tokens: &mut Vec<String>) {
        match self.clitic_regex.captures(segment) {
            Some(caps) => {
                tokens.push(caps[1].to_string());
                tokens.push(caps[2].to_string());
            }
            None => tokens.push(segment.to_string()),
        }
    }
}

impl WordTokenizer for TreebankWordTokenizer {
    fn tokenize_words(&self, text: &str) -> Vec<String> {
        let normalized = normalize_unicode(text);
        let mut tokens = Vec::new();

        for segment in join_hyphenated(normalized.split_word_bounds()) {
            if segment.trim().is_empty() {
                continue;
            }
            self.push_segment(&segment, &mut tokens);
        }

        tokens
    }
}

/// Rejoin `word-word` runs that word-boundary splitting separates, so
/// `state-of-the-art` stays one token. A dash with spaces around it is left alone.
fn join_hyphenated<'a>(segments: impl Iterator<Item = &'a str>) -> Vec<String> {
    let segments: Vec<&str> = segments.collect();
    let mut joined = Vec::with_capacity(segments.len());
    let mut i = 0;

    while i < segments.len() {
        let mut segment = segments[i].to_string();
        if is_word(segments[i]) {
            while i + 2 < segments.len() && segments[i + 1] == "-" && is_word(segments[i + 2]) {
                segment.push('-');
                segment.push_str(segments[i + 2]);
                i += 2;
            }
        }
        joined.push(segment);
        i += 1;
    }

    joined
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Sentence splitter over Unicode sentence boundaries
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Fold typographic quotes and dashes into their ASCII forms
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            _ => c,
        })
        .collect()
}
