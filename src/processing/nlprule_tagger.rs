//! Statistical tagging through an nlprule tokenizer binary

use crate::error::{NlpTasksError, Result};
use crate::processing::pos_tagger::{PosTagger, RuleBasedTagger};
use log::{debug, info};
use nlprule::Tokenizer;
use std::path::Path;

/// Disambiguation markers nlprule attaches next to the real tags
const SENTENCE_MARKERS: [&str; 2] = ["SENT_START", "SENT_END"];

/// How far ahead a token is searched for when nlprule splits words differently
const ALIGN_WINDOW: usize = 4;

/// Tags with nlprule's English tokenizer (`en_tokenizer.bin`).
///
/// Tokens nlprule splits differently from the word tokenizer (clitics, some
/// punctuation) take the rule-based tag instead.
pub struct NlpruleTagger {
    tokenizer: Tokenizer,
    fallback: RuleBasedTagger,
}

impl NlpruleTagger {
    pub fn from_file(path: &Path) -> Result<Self> {
        let tokenizer = Tokenizer::new(path).map_err(|e| {
            NlpTasksError::resource_unavailable(format!("nlprule tokenizer {}", path.display()), e)
        })?;

        info!("Loaded nlprule tokenizer from {}", path.display());
        Ok(Self {
            tokenizer,
            fallback: RuleBasedTagger::new(),
        })
    }

    pub fn with_fallback(mut self, fallback: RuleBasedTagger) -> Self {
        self.fallback = fallback;
        self
    }

    /// Word text and Penn tag of every token nlprule produced, in order.
    fn tagged_words(&self, text: &str) -> Vec<(String, String)> {
        let mut words = Vec::new();

        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let word = token.word().text().as_str();
                if word.is_empty() {
                    continue;
                }

                let tag = token
                    .word()
                    .tags()
                    .iter()
                    .map(|data| penn_tag(data.pos().as_str()))
                    .find(|tag| !tag.is_empty() && !SENTENCE_MARKERS.contains(tag));

                if let Some(tag) = tag {
                    words.push((word.to_lowercase(), tag.to_string()));
                }
            }
        }

        words
    }
}

impl PosTagger for NlpruleTagger {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let words = self.tagged_words(&tokens.join(" "));
        let fallback = self.fallback.tag(tokens);
        let mut cursor = 0;
        let mut misaligned = 0;

        let tagged: Vec<(String, String)> = tokens
            .iter()
            .zip(fallback)
            .map(|(token, (_, fallback_tag))| {
                let lower = token.to_lowercase();
                let end = (cursor + ALIGN_WINDOW).min(words.len());
                let found = words[cursor..end].iter().position(|(word, _)| *word == lower);

                match found {
                    Some(offset) => {
                        let tag = words[cursor + offset].1.clone();
                        cursor += offset + 1;
                        (token.clone(), tag)
                    }
                    None => {
                        misaligned += 1;
                        (token.clone(), fallback_tag)
                    }
                }
            })
            .collect();

        if misaligned > 0 {
            debug!("{} of {} tokens took the rule-based tag", misaligned, tokens.len());
        }
        tagged
    }
}

/// `NN:UN` -> `NN`. LanguageTool's English tagset refines Penn tags after a colon.
fn penn_tag(pos: &str) -> &str {
    pos.split(':').next().unwrap_or(pos)
}
