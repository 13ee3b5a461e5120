mod config;
mod links;
mod parser;
mod prompt;
mod scanner;
mod validator;

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use config::{ConsistencyMode, ValidatorConfig};
use prompt::PromptGenerator;
use validator::{ValidationResult, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Genesis Validator - Validates template repository consistency
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None, after_help = "\
Exit Codes:
  0 - All checks passed
  1 - Critical issues found (orphaned/missing files, broken links)
  2 - Warnings found (inconsistencies)")]
struct Args {
    /// Path to the genesis directory (default: genesis)
    #[arg(long, env = "GENESIS_ROOT")]
    genesis_root: Option<PathBuf>,

    /// Repository root swept for markdown links (default: .)
    #[arg(long)]
    repo_root: Option<PathBuf>,

    /// Optional JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// How entry-point vs. checklist mismatches are treated
    #[arg(long, value_enum)]
    consistency: Option<CliConsistencyMode>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable remediation prompt generation
    #[arg(long)]
    no_prompt: bool,

    /// Output format for the result
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliConsistencyMode {
    Off,
    Warn,
    Fail,
}

impl From<CliConsistencyMode> for ConsistencyMode {
    fn from(mode: CliConsistencyMode) -> Self {
        match mode {
            CliConsistencyMode::Off => ConsistencyMode::Off,
            CliConsistencyMode::Warn => ConsistencyMode::Warn,
            CliConsistencyMode::Fail => ConsistencyMode::Fail,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Validation failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = build_config(&args)?;

    let validator = Validator::new(&config);
    let result = validator.validate().context("validation aborted")?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!("{}", result.summary());

            if config.verbose {
                print_detailed_results(&result);
            }

            if config.generate_prompt && (!result.is_valid() || result.has_warnings()) {
                let prompt = PromptGenerator::new().generate(&result)?;
                println!("{}", "=".repeat(80));
                println!("REMEDIATION PROMPT");
                println!("{}", "=".repeat(80));
                println!();
                println!("{prompt}");
            }
        }
    }

    if !result.is_valid() {
        return Ok(ExitCode::from(1));
    }
    if result.has_warnings() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// Load the optional config file, then apply CLI overrides.
fn build_config(args: &Args) -> anyhow::Result<ValidatorConfig> {
    let mut config = match &args.config {
        Some(path) => config::read_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .with_context(|| format!("config file {} does not exist", path.display()))?,
        None => ValidatorConfig::default(),
    };

    if let Some(root) = &args.genesis_root {
        config.genesis_root = root.clone();
    }
    if let Some(root) = &args.repo_root {
        config.repo_root = root.clone();
    }
    if args.verbose {
        config.verbose = true;
    }
    if args.no_prompt {
        config.generate_prompt = false;
    }
    if let Some(mode) = args.consistency {
        config.consistency = mode.into();
    }

    Ok(config)
}

fn print_detailed_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {error}");
        }
        println!();
    }

    if !result.template_files.is_empty() {
        println!("Template files:");
        for file in &result.template_files {
            println!("  {file}");
        }
        println!();
    }

    if !result.orphaned_files.is_empty() {
        println!("Orphaned files:");
        for file in &result.orphaned_files {
            println!("  {file}");
        }
        println!();
    }

    if !result.missing_files.is_empty() {
        println!("Missing files:");
        for file in &result.missing_files {
            let docs = result
                .referenced_files
                .get(file)
                .map(|d| d.join(", "))
                .unwrap_or_default();
            println!("  {file} (referenced in: {docs})");
        }
        println!();
    }

    if !result.inconsistencies.is_empty() {
        println!("Inconsistencies:");
        for (i, inc) in result.inconsistencies.iter().enumerate() {
            println!(
                "  {}. [{}] {}: {}",
                i + 1,
                inc.kind,
                inc.file,
                inc.description
            );
            if let Some(location) = &inc.location {
                println!("     Location: {location}");
            }
        }
        println!();
    }
}
