//! Error handling for the nlp-tasks library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpTasksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A linguistic resource (stopword list, lexicon, dictionary) could not be loaded.
    #[error("Resource unavailable: {resource}: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, NlpTasksError>;

impl NlpTasksError {
    pub fn resource_unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        NlpTasksError::ResourceUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
