//! Configuration management for nlp-tasks

use crate::error::{NlpTasksError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resources: ResourceConfig,
    pub processing: ProcessingConfig,
    pub sentiment: SentimentConfig,
    pub output: OutputConfig,
}

/// Where linguistic resources come from. `None` means the embedded default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Replacement stopword list, one word per line
    pub stopwords_path: Option<PathBuf>,
    pub extra_stopwords: Vec<String>,
    /// WordNet dictionary directory holding index.* and *.exc files
    pub wordnet_dir: Option<PathBuf>,
    /// Sentiment lexicon, `word<TAB>valence` per line
    pub sentiment_lexicon_path: Option<PathBuf>,
    /// Additional tagger entries, `word TAG` per line
    pub tagger_lexicon_path: Option<PathBuf>,
    /// nlprule `en_tokenizer.bin`; needs the `nlprule` feature
    pub nlprule_tokenizer_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub min_token_chars: usize,
    pub default_top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub neutral_threshold: f64,
    pub positive_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            min_token_chars: 2,
            default_top_n: 10,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: 0.5,
            positive_threshold: 0.5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| NlpTasksError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NlpTasksError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("nlp-tasks")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.min_token_chars == 0 {
            return Err(NlpTasksError::Configuration(
                "processing.min_token_chars must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("sentiment.neutral_threshold", self.sentiment.neutral_threshold),
            ("sentiment.positive_threshold", self.sentiment.positive_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NlpTasksError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NlpTasksError::Configuration(format!("Failed to serialize config: {}", e)))
    }
}
