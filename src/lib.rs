//! Text preprocessing helpers: tokenization, stopword removal, part-of-speech
//! tagging, lemmatization, frequency distribution and sentiment bucketing.
//!
//! ```
//! use nlp_tasks::Preprocessor;
//!
//! let preprocessor = Preprocessor::default();
//! let tokens = preprocessor.tokenize("The cats are sleeping.");
//! assert_eq!(tokens, vec!["cats", "sleeping"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{NlpTasksError, Result};
pub use processing::pipeline::{LinguisticResources, Preprocessor, TextAnalysis};
pub use processing::sentiment::{PolarityScores, SentimentBucket, SentimentReport};
pub use processing::tag_normalizer::{wordnet_pos, WordNetPos};
