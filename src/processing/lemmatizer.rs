//! Dictionary-validated lemmatization in the style of WordNet's morphy

use crate::error::{NlpTasksError, Result};
use crate::processing::tag_normalizer::WordNetPos;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Maps a word to its base form, optionally guided by a word class.
pub trait Lemmatizer: Send + Sync {
    /// `None` selects the lemmatizer's default mode.
    fn lemmatize(&self, word: &str, pos: Option<WordNetPos>) -> String;
}

/// Word class used when no POS hint is given
pub const DEFAULT_POS: WordNetPos = WordNetPos::Noun;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

pub(crate) fn detachment_rules(pos: WordNetPos) -> &'static [(&'static str, &'static str)] {
    match pos {
        WordNetPos::Noun => NOUN_RULES,
        WordNetPos::Verb => VERB_RULES,
        WordNetPos::Adjective => ADJECTIVE_RULES,
        WordNetPos::Adverb => &[],
    }
}

/// Lemma index and exception list for one word class
#[derive(Debug, Default, Clone)]
struct PosTables {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

/// Lemmatizer backed by WordNet-format lemma indexes and exception lists.
///
/// Candidates are the word itself, its exception entries and every suffix
/// rewrite for the word class. The shortest candidate present in the lemma
/// index wins; with no survivor the word comes back unchanged.
pub struct WordNetLemmatizer {
    tables: HashMap<WordNetPos, PosTables>,
}

impl Default for WordNetLemmatizer {
    fn default() -> Self {
        Self::embedded()
    }
}

impl WordNetLemmatizer {
    /// Compact built-in lexicon covering common English words.
    pub fn embedded() -> Self {
        let sources = [
            (
                WordNetPos::Noun,
                include_str!("../../data/wordnet/index.noun"),
                include_str!("../../data/wordnet/noun.exc"),
            ),
            (
                WordNetPos::Verb,
                include_str!("../../data/wordnet/index.verb"),
                include_str!("../../data/wordnet/verb.exc"),
            ),
            (
                WordNetPos::Adjective,
                include_str!("../../data/wordnet/index.adj"),
                include_str!("../../data/wordnet/adj.exc"),
            ),
            (
                WordNetPos::Adverb,
                include_str!("../../data/wordnet/index.adv"),
                include_str!("../../data/wordnet/adv.exc"),
            ),
        ];

        let tables = sources
            .into_iter()
            .map(|(pos, index, exc)| {
                (
                    pos,
                    PosTables {
                        lemmas: parse_index(index),
                        exceptions: parse_exceptions(exc),
                    },
                )
            })
            .collect();

        Self { tables }
    }

    /// Load a WordNet dictionary directory (`index.noun`, `verb.exc`, ...).
    ///
    /// Every `index.*` file must exist. Exception files are optional.
    pub fn from_dict_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(NlpTasksError::resource_unavailable(
                "WordNet dictionary",
                format!("{} is not a directory", dir.display()),
            ));
        }

        let mut tables = HashMap::new();
        for pos in WordNetPos::ALL {
            let index_path = dir.join(format!("index.{}", pos.file_stem()));
            let index = std::fs::read_to_string(&index_path).map_err(|e| {
                NlpTasksError::resource_unavailable(
                    format!("WordNet index {}", index_path.display()),
                    e,
                )
            })?;

            let exc_path = dir.join(format!("{}.exc", pos.file_stem()));
            let exceptions = match std::fs::read_to_string(&exc_path) {
                Ok(content) => parse_exceptions(&content),
                Err(e) => {
                    debug!("No exception list at {}: {}", exc_path.display(), e);
                    HashMap::new()
                }
            };

            let lemmas = parse_index(&index);
            info!("Loaded {} {} lemmas from {}", lemmas.len(), pos, index_path.display());
            tables.insert(pos, PosTables { lemmas, exceptions });
        }

        Ok(Self { tables })
    }

    /// All dictionary-valid base forms of `form` for `pos`, in candidate order.
    pub fn morphy(&self, form: &str, pos: WordNetPos) -> Vec<String> {
        let Some(tables) = self.tables.get(&pos) else {
            return Vec::new();
        };

        let mut candidates: Vec<String> = vec![form.to_string()];
        if let Some(bases) = tables.exceptions.get(form) {
            candidates.extend(bases.iter().cloned());
        }
        for (suffix, ending) in detachment_rules(pos) {
            if let Some(stem) = form.strip_suffix(suffix) {
                candidates.push(format!("{}{}", stem, ending));
            }
        }

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| !c.is_empty() && tables.lemmas.contains(c))
            .filter(|c| seen.insert(c.clone()))
            .collect()
    }

    pub fn lemma_count(&self, pos: WordNetPos) -> usize {
        self.tables.get(&pos).map(|t| t.lemmas.len()).unwrap_or(0)
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str, pos: Option<WordNetPos>) -> String {
        let pos = pos.unwrap_or(DEFAULT_POS);
        let lemmas = self.morphy(word, pos);

        // min_by_key keeps the first of equally short candidates
        lemmas
            .into_iter()
            .min_by_key(|lemma| lemma.chars().count())
            .unwrap_or_else(|| word.to_string())
    }
}

/// First field of each line; lines starting with whitespace are license header.
fn parse_index(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(|line| line.split_whitespace().next())
        .map(|lemma| lemma.to_lowercase())
        .collect()
}

/// `inflected base [base ...]` per line
fn parse_exceptions(content: &str) -> HashMap<String, Vec<String>> {
    let mut exceptions = HashMap::new();
    for line in content.lines() {
        let mut fields = line.split_whitespace();
        if let Some(inflected) = fields.next() {
            let bases: Vec<String> = fields.map(str::to_string).collect();
            if !bases.is_empty() {
                exceptions.insert(inflected.to_string(), bases);
            }
        }
    }
    exceptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verb_inflection_collapses() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("continues", Some(WordNetPos::Verb)), "continue");
        assert_eq!(lemmatizer.lemmatize("continuing", Some(WordNetPos::Verb)), "continue");
        assert_eq!(lemmatizer.lemmatize("continued", Some(WordNetPos::Verb)), "continue");
    }

    #[test]
    fn test_derivational_noun_kept() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(
            lemmatizer.lemmatize("continuation", Some(WordNetPos::Noun)),
            "continuation"
        );
    }

    #[test]
    fn test_exceptions() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("is", Some(WordNetPos::Verb)), "be");
        assert_eq!(lemmatizer.lemmatize("went", Some(WordNetPos::Verb)), "go");
        assert_eq!(lemmatizer.lemmatize("children", Some(WordNetPos::Noun)), "child");
        assert_eq!(lemmatizer.lemmatize("better", Some(WordNetPos::Adjective)), "good");
    }

    #[test]
    fn test_everyday_vocabulary() {
        let lemmatizer = WordNetLemmatizer::embedded();
        let cases = [
            ("announced", WordNetPos::Verb, "announce"),
            ("acquired", WordNetPos::Verb, "acquire"),
            ("hired", WordNetPos::Verb, "hire"),
            ("bought", WordNetPos::Verb, "buy"),
            ("layoffs", WordNetPos::Noun, "layoff"),
            ("shareholders", WordNetPos::Noun, "shareholder"),
            ("negotiations", WordNetPos::Noun, "negotiation"),
            ("employees", WordNetPos::Noun, "employee"),
            ("wolves", WordNetPos::Noun, "wolf"),
            ("mice", WordNetPos::Noun, "mouse"),
            ("stronger", WordNetPos::Adjective, "strong"),
            ("bigger", WordNetPos::Adjective, "big"),
            ("happier", WordNetPos::Adjective, "happy"),
        ];

        for (word, pos, lemma) in cases {
            assert_eq!(lemmatizer.lemmatize(word, Some(pos)), lemma, "{}", word);
        }
    }

    #[test]
    fn test_noun_rules() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("boxes", Some(WordNetPos::Noun)), "box");
        assert_eq!(lemmatizer.lemmatize("churches", Some(WordNetPos::Noun)), "church");
        assert_eq!(lemmatizer.lemmatize("cities", Some(WordNetPos::Noun)), "city");
    }

    #[test]
    fn test_default_mode_is_noun() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("dogs", None), "dog");
        // Verb-only inflection is untouched in noun mode
        assert_eq!(lemmatizer.lemmatize("running", None), "running");
    }

    #[test]
    fn test_unknown_word_unchanged() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("frobnicates", Some(WordNetPos::Verb)), "frobnicates");
        assert_eq!(lemmatizer.lemmatize("", None), "");
    }

    #[test]
    fn test_adverb_has_no_rules() {
        let lemmatizer = WordNetLemmatizer::embedded();
        assert_eq!(lemmatizer.lemmatize("quickly", Some(WordNetPos::Adverb)), "quickly");
        assert_eq!(lemmatizer.lemmatize("better", Some(WordNetPos::Adverb)), "well");
    }

    #[test]
    fn test_from_dict_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.noun"),
            "  1 license header line\nwug n 1 0 1 0 00000001\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("index.verb"), "blick v 1 0 1 0 00000002\n").unwrap();
        std::fs::write(dir.path().join("index.adj"), "").unwrap();
        std::fs::write(dir.path().join("index.adv"), "").unwrap();
        std::fs::write(dir.path().join("verb.exc"), "blook blick\n").unwrap();

        let lemmatizer = WordNetLemmatizer::from_dict_dir(dir.path()).unwrap();
        assert_eq!(lemmatizer.lemma_count(WordNetPos::Noun), 1);
        assert_eq!(lemmatizer.lemmatize("wugs", None), "wug");
        assert_eq!(lemmatizer.lemmatize("blook", Some(WordNetPos::Verb)), "blick");
        assert_eq!(lemmatizer.lemmatize("blicking", Some(WordNetPos::Verb)), "blick");
    }

    #[test]
    fn test_missing_index_is_resource_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.noun"), "wug n\n").unwrap();

        let result = WordNetLemmatizer::from_dict_dir(dir.path());
        assert!(matches!(
            result,
            Err(NlpTasksError::ResourceUnavailable { .. })
        ));
    }
}
