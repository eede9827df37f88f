//! Text preprocessing pipeline and its linguistic services

pub mod freq_dist;
pub mod lemmatizer;
#[cfg(feature = "nlprule")]
pub mod nlprule_tagger;
pub mod pipeline;
pub mod pos_tagger;
pub mod sentiment;
pub mod stopwords;
pub mod tag_normalizer;
pub mod tokenizer;
