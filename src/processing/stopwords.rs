//! Stopword set used by the token filter

use crate::error::{NlpTasksError, Result};
use log::info;
use std::collections::HashSet;
use std::path::Path;

const ENGLISH_STOPWORDS: &str = include_str!("../../data/stopwords_english.txt");

/// Immutable set of lowercase stopwords.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordSet {
    /// The 179-word NLTK English list
    pub fn english() -> Self {
        Self::from_lines(ENGLISH_STOPWORDS)
    }

    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a list with one word per line. Blank lines and `#` comments are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NlpTasksError::resource_unavailable(format!("stopword list {}", path.display()), e)
        })?;
        let set = Self::from_lines(&content);
        info!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    fn from_lines(content: &str) -> Self {
        Self::from_words(
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with('#')),
        )
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    /// Membership test; callers pass already lowercased tokens.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
