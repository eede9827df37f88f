//! nlp-tasks: text preprocessing from the command line

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use nlp_tasks::cli::{self, Cli, Commands, ConfigAction, InputArgs};
use nlp_tasks::config::Config;
use nlp_tasks::input::manager::InputManager;
use nlp_tasks::output::formatter::{save_report_to_file, ReportGenerator};
use nlp_tasks::output::report::Report;
use nlp_tasks::{NlpTasksError, Preprocessor};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    let (input, output) = match &command {
        Commands::Config { action } => return run_config(action.as_ref(), &config, &config_path),
        Commands::Tokens { input, output }
        | Commands::Pos { input, output }
        | Commands::Lemmas { input, output }
        | Commands::Sentiment { input, output }
        | Commands::Freq { input, output, .. }
        | Commands::Analyze { input, output, .. } => (input, output),
    };

    let format = match &output.output {
        Some(format) => cli::parse_output_format(format).map_err(NlpTasksError::InvalidInput)?,
        None => config.output.format,
    };

    let (text, source) = read_input(input)?;

    let started = Instant::now();
    let preprocessor =
        Preprocessor::from_config(&config).context("Failed to load linguistic resources")?;
    info!("Processing {} characters", text.len());

    let report = build_report(&command, &preprocessor, &text, &config, source)
        .with_processing_time(started.elapsed().as_millis() as u64);

    let detailed = output.detailed || config.output.detailed;
    let use_colors = config.output.color_output && output.save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, true);
    let rendered = generator.generate_report(&report, format)?;

    match &output.save {
        Some(path) => {
            save_report_to_file(&rendered, path)
                .with_context(|| format!("Failed to save report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn build_report(
    command: &Commands,
    preprocessor: &Preprocessor,
    text: &str,
    config: &Config,
    source: Option<String>,
) -> Report {
    let report = Report::new(source.clone());
    match command {
        Commands::Tokens { .. } => report.with_tokens(preprocessor.tokenize(text)),
        Commands::Pos { .. } => {
            let tokens = preprocessor.tokenize(text);
            report.with_tagged(preprocessor.get_pos(&tokens))
        }
        Commands::Lemmas { .. } => {
            let tagged = preprocessor.get_pos(&preprocessor.tokenize(text));
            let lemmas = preprocessor.lemmatize(&tagged);
            report.with_tagged(tagged).with_lemmas(lemmas)
        }
        Commands::Freq { top, .. } => {
            let top_n = top.unwrap_or(config.processing.default_top_n);
            let tokens = preprocessor.tokenize(text);
            report.with_frequencies(preprocessor.get_distfreq(&tokens, top_n))
        }
        Commands::Sentiment { .. } => report.with_sentiment(preprocessor.sentiment_analysis(text)),
        Commands::Analyze { top, .. } => {
            let top_n = top.unwrap_or(config.processing.default_top_n);
            Report::from_analysis(preprocessor.analyze(text, top_n), source)
        }
        Commands::Config { .. } => report,
    }
}

fn read_input(input: &InputArgs) -> Result<(String, Option<String>)> {
    if let Some(text) = &input.text {
        return Ok((text.clone(), None));
    }

    let path = input
        .file
        .as_ref()
        .ok_or_else(|| NlpTasksError::InvalidInput("Either --text or --file is required".to_string()))?;

    cli::validate_file_extension(path, &["txt", "md", "markdown"])
        .map_err(|e| NlpTasksError::InvalidInput(format!("Input file: {}", e)))?;

    debug!("Reading input from {}", path.display());
    let text = InputManager::new()
        .with_cache(false)
        .extract_text(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok((text, Some(path.display().to_string())))
}

fn run_config(action: Option<&ConfigAction>, config: &Config, config_path: &Path) -> Result<()> {
    match action.unwrap_or(&ConfigAction::Show) {
        ConfigAction::Show => {
            println!("# {}", config_path.display());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Path => println!("{}", config_path.display()),
        ConfigAction::Reset => {
            Config::default().save_to(config_path)?;
            println!("Configuration reset to defaults at {}", config_path.display());
        }
    }
    Ok(())
}
