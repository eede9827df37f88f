//! Output formatters for console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{NlpTasksError, Result};
use crate::output::report::Report;
use crate::processing::sentiment::{ScoredSentence, SentimentCounts, SentimentReport};
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// One-line sentiment summary, e.g. `Positive: 2 | Negative: 1 | Neutral: 4`
pub fn sentiment_summary_line(counts: &SentimentCounts) -> String {
    format!(
        "Positive: {} | Negative: {} | Neutral: {}",
        counts.positive, counts.negative, counts.neutral
    )
}

fn fmt_err(e: std::fmt::Error) -> NlpTasksError {
    NlpTasksError::OutputFormatting(e.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_sentences(
        &self,
        out: &mut String,
        label: &str,
        color: Color,
        sentences: &[ScoredSentence],
    ) -> Result<()> {
        if sentences.is_empty() {
            return Ok(());
        }
        out.push_str(&self.format_header(label, 3));
        for sentence in sentences {
            writeln!(
                out,
                "  • {} {}",
                self.colorize(&sentence.text, color),
                self.colorize(
                    &format!(
                        "(pos {:.3}, neg {:.3}, neu {:.3}, compound {:.4})",
                        sentence.scores.pos,
                        sentence.scores.neg,
                        sentence.scores.neu,
                        sentence.scores.compound
                    ),
                    Color::BrightBlack
                )
            )
            .map_err(fmt_err)?;
        }
        Ok(())
    }

    fn format_sentiment(&self, out: &mut String, sentiment: &SentimentReport) -> Result<()> {
        out.push_str(&self.format_header("Sentiment", 2));
        writeln!(out, "{}", sentiment_summary_line(&sentiment.counts())).map_err(fmt_err)?;

        if self.detailed {
            self.format_sentences(out, "Positive", Color::Green, &sentiment.positive)?;
            self.format_sentences(out, "Negative", Color::Red, &sentiment.negative)?;
            self.format_sentences(out, "Neutral", Color::White, &sentiment.neutral)?;
        }
        Ok(())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut out = String::new();

        if self.detailed {
            out.push_str(&self.format_header("TEXT ANALYSIS", 1));
            writeln!(
                out,
                "Generated: {} | Processing time: {}ms",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            )
            .map_err(fmt_err)?;
            if let Some(source) = &report.metadata.source {
                writeln!(out, "Source: {}", source).map_err(fmt_err)?;
            }
        }

        if let Some(tokens) = &report.tokens {
            out.push_str(&self.format_header(&format!("Tokens ({})", tokens.len()), 2));
            writeln!(out, "{}", tokens.join(" ")).map_err(fmt_err)?;
        }

        if let Some(tagged) = &report.tagged {
            out.push_str(&self.format_header("Part of speech", 2));
            let line = tagged
                .iter()
                .map(|t| format!("{}/{}", t.word, self.colorize(&t.tag, Color::Cyan)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{}", line).map_err(fmt_err)?;
        }

        if let Some(lemmas) = &report.lemmas {
            out.push_str(&self.format_header("Lemmas", 2));
            writeln!(out, "{}", lemmas.join(" ")).map_err(fmt_err)?;
        }

        if let Some(frequencies) = &report.frequencies {
            out.push_str(&self.format_header("Most common", 2));
            for (i, entry) in frequencies.iter().enumerate() {
                writeln!(
                    out,
                    "  {:>2}. {:<20} {}",
                    i + 1,
                    entry.token,
                    self.colorize(&entry.count.to_string(), Color::Yellow)
                )
                .map_err(fmt_err)?;
            }
        }

        if let Some(sentiment) = &report.sentiment {
            self.format_sentiment(&mut out, sentiment)?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn sentence_table(out: &mut String, title: &str, sentences: &[ScoredSentence]) -> Result<()> {
        if sentences.is_empty() {
            return Ok(());
        }
        writeln!(out, "\n### {}\n", title).map_err(fmt_err)?;
        writeln!(out, "| Sentence | pos | neg | neu | compound |").map_err(fmt_err)?;
        writeln!(out, "|---|---|---|---|---|").map_err(fmt_err)?;
        for s in sentences {
            writeln!(
                out,
                "| {} | {:.3} | {:.3} | {:.3} | {:.4} |",
                s.text.replace('|', "\\|"),
                s.scores.pos,
                s.scores.neg,
                s.scores.neu,
                s.scores.compound
            )
            .map_err(fmt_err)?;
        }
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut out = String::from("# Text Analysis\n");

        if self.include_metadata {
            writeln!(
                out,
                "\n*Generated {} by nlp-tasks {}*",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version
            )
            .map_err(fmt_err)?;
            if let Some(source) = &report.metadata.source {
                writeln!(out, "\n*Source: `{}`*", source).map_err(fmt_err)?;
            }
        }

        if let Some(tokens) = &report.tokens {
            writeln!(out, "\n## Tokens ({})\n\n{}", tokens.len(), tokens.join(" ")).map_err(fmt_err)?;
        }

        if let Some(tagged) = &report.tagged {
            writeln!(out, "\n## Part of speech\n\n| Word | Tag |\n|---|---|").map_err(fmt_err)?;
            for t in tagged {
                writeln!(out, "| {} | {} |", t.word, t.tag).map_err(fmt_err)?;
            }
        }

        if let Some(lemmas) = &report.lemmas {
            writeln!(out, "\n## Lemmas\n\n{}", lemmas.join(" ")).map_err(fmt_err)?;
        }

        if let Some(frequencies) = &report.frequencies {
            writeln!(out, "\n## Most common\n\n| Token | Count |\n|---|---|").map_err(fmt_err)?;
            for entry in frequencies {
                writeln!(out, "| {} | {} |", entry.token, entry.count).map_err(fmt_err)?;
            }
        }

        if let Some(sentiment) = &report.sentiment {
            writeln!(out, "\n## Sentiment\n\n{}", sentiment_summary_line(&sentiment.counts())).map_err(fmt_err)?;
            Self::sentence_table(&mut out, "Positive", &sentiment.positive)?;
            Self::sentence_table(&mut out, "Negative", &sentiment.negative)?;
            Self::sentence_table(&mut out, "Neutral", &sentiment.neutral)?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate_report(&self, report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
