//! Treebank tag to lemmatizer POS mapping

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word classes the lemmatizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordNetPos {
    Adjective,
    Verb,
    Noun,
    Adverb,
}

impl WordNetPos {
    pub const ALL: [WordNetPos; 4] = [
        WordNetPos::Noun,
        WordNetPos::Verb,
        WordNetPos::Adjective,
        WordNetPos::Adverb,
    ];

    /// File suffix used by WordNet dictionary files (`index.noun`, `verb.exc`, ...)
    pub fn file_stem(self) -> &'static str {
        match self {
            WordNetPos::Noun => "noun",
            WordNetPos::Verb => "verb",
            WordNetPos::Adjective => "adj",
            WordNetPos::Adverb => "adv",
        }
    }
}

impl fmt::Display for WordNetPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WordNetPos::Adjective => "ADJECTIVE",
            WordNetPos::Verb => "VERB",
            WordNetPos::Noun => "NOUN",
            WordNetPos::Adverb => "ADVERB",
        };
        f.write_str(name)
    }
}

/// Map a Penn-Treebank tag to a lemmatizer POS by its first character.
///
/// `J*` is an adjective, `V*` a verb, `N*` a noun and `R*` an adverb. Every
/// other tag, the empty string included, is unspecified and yields `None`.
/// The match is case-sensitive.
pub fn wordnet_pos(treebank_tag: &str) -> Option<WordNetPos> {
    match treebank_tag.chars().next() {
        Some('J') => Some(WordNetPos::Adjective),
        Some('V') => Some(WordNetPos::Verb),
        Some('N') => Some(WordNetPos::Noun),
        Some('R') => Some(WordNetPos::Adverb),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_dispatch() {
        for tag in ["JJ", "JJR", "JJS"] {
            assert_eq!(wordnet_pos(tag), Some(WordNetPos::Adjective));
        }
        for tag in ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"] {
            assert_eq!(wordnet_pos(tag), Some(WordNetPos::Verb));
        }
        for tag in ["NN", "NNS", "NNP", "NNPS"] {
            assert_eq!(wordnet_pos(tag), Some(WordNetPos::Noun));
        }
        for tag in ["RB", "RBR", "RBS", "RP"] {
            assert_eq!(wordnet_pos(tag), Some(WordNetPos::Adverb));
        }
    }

    #[test]
    fn test_unspecified() {
        for tag in ["", "DT", "IN", "CD", "PRP", "MD", ".", ",", "WRB", "UH"] {
            assert_eq!(wordnet_pos(tag), None, "tag {:?}", tag);
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(wordnet_pos("nn"), None);
        assert_eq!(wordnet_pos("vbz"), None);
    }

    #[test]
    fn test_only_first_character_matters() {
        assert_eq!(wordnet_pos("Nonsense"), Some(WordNetPos::Noun));
        assert_eq!(wordnet_pos("X-NN"), None);
    }
}
