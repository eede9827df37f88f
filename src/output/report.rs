//! Report structures handed to the formatters

use crate::processing::pipeline::TextAnalysis;
use crate::processing::sentiment::SentimentReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one CLI run. Sections a command did not compute stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagged: Option<Vec<TaggedToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<Vec<FrequencyEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    /// File path, or `None` for inline text
    pub source: Option<String>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub token: String,
    pub count: usize,
}

impl Report {
    pub fn new(source: Option<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                source,
                processing_time_ms: 0,
            },
            tokens: None,
            tagged: None,
            lemmas: None,
            frequencies: None,
            sentiment: None,
        }
    }

    pub fn from_analysis(analysis: TextAnalysis, source: Option<String>) -> Self {
        Self::new(source)
            .with_tokens(analysis.tokens)
            .with_tagged(analysis.tagged)
            .with_lemmas(analysis.lemmas)
            .with_frequencies(analysis.frequencies)
            .with_sentiment(analysis.sentiment)
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_tagged(mut self, tagged: Vec<(String, String)>) -> Self {
        self.tagged = Some(
            tagged
                .into_iter()
                .map(|(word, tag)| TaggedToken { word, tag })
                .collect(),
        );
        self
    }

    pub fn with_lemmas(mut self, lemmas: Vec<String>) -> Self {
        self.lemmas = Some(lemmas);
        self
    }

    pub fn with_frequencies(mut self, frequencies: Vec<(String, usize)>) -> Self {
        self.frequencies = Some(
            frequencies
                .into_iter()
                .map(|(token, count)| FrequencyEntry { token, count })
                .collect(),
        );
        self
    }

    pub fn with_sentiment(mut self, sentiment: SentimentReport) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_processing_time(mut self, elapsed_ms: u64) -> Self {
        self.metadata.processing_time_ms = elapsed_ms;
        self
    }
}
