//! CLI interface for nlp-tasks

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nlp-tasks")]
#[command(about = "Text preprocessing: tokens, POS tags, lemmas, frequencies and sentiment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Where the text comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Inline text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Path to a text file (TXT, MD)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Include metadata and per-sentence details
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize, lowercase and drop stopwords
    Tokens {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Tag tokens with Penn-Treebank parts of speech
    Pos {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reduce tagged tokens to their lemmas
    Lemmas {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Most common tokens
    Freq {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Number of entries to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Bucket sentences into positive, negative and neutral
    Sentiment {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the whole pipeline
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Number of frequency entries to show
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("a.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("a.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("noext"), &["txt"]).is_err());
    }

    #[test]
    fn test_cli_parses_freq() {
        let cli = Cli::try_parse_from(["nlp-tasks", "freq", "--text", "a b a", "-n", "3", "-o", "json"]).unwrap();
        match cli.command {
            Commands::Freq { input, output, top } => {
                assert_eq!(input.text.as_deref(), Some("a b a"));
                assert_eq!(top, Some(3));
                assert_eq!(output.output.as_deref(), Some("json"));
            }
            _ => panic!("expected freq command"),
        }
    }

    #[test]
    fn test_cli_requires_single_input() {
        assert!(Cli::try_parse_from(["nlp-tasks", "tokens"]).is_err());
        assert!(Cli::try_parse_from(["nlp-tasks", "tokens", "-t", "x", "-f", "a.txt"]).is_err());
    }
}
