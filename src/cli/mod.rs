//! CLI command definitions and handlers

mod detect;
mod init;
mod scan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeorigin::config::DetectorConfig;
use codeorigin::models::Language;
use codeorigin::reporters::OutputFormat;
use console::style;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// codeorigin - estimate whether source code was written by an AI or a human
#[derive(Parser, Debug)]
#[command(name = "codeorigin")]
#[command(
    version,
    about = "Classify source code as AI-generated or human-written",
    long_about = "codeorigin extracts lexical, comment, structural, naming and style features \
from source code and scores them with a trained model or a built-in heuristic.\n\n\
Supported languages: Python, JavaScript, TypeScript, Java, C, C++, C#, Go, Rust",
    after_help = "\
Examples:
  codeorigin detect src/app.py              Classify one file
  cat snippet.js | codeorigin detect -l js  Classify stdin
  codeorigin detect app.py --format json    JSON output for scripting
  codeorigin features app.py                Show the extracted feature vector
  codeorigin scan . --workers 4             Classify every source file in a tree"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./codeorigin.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single file or stdin
    Detect {
        /// File to analyze, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Language tag (python, js, ts, java, c, cpp, cs, go, rust); inferred from the extension when omitted
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = parse_format)]
        format: OutputFormat,

        /// Trained model file (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Print the extracted feature vector without scoring
    Features {
        /// File to analyze, or - for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Language tag; inferred from the extension when omitted
        #[arg(long, short = 'l')]
        language: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "json", value_parser = parse_format)]
        format: OutputFormat,
    },

    /// Classify every supported source file under a directory
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = parse_format)]
        format: OutputFormat,

        /// Trained model file (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Number of parallel workers (1-64)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,
    },

    /// List supported languages
    Languages,

    /// Create the user config file with example settings
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect {
            input,
            language,
            format,
            model,
        } => {
            let config = load_config(cli.config.as_deref(), model)?;
            detect::run(&config, &input, language.as_deref(), format)
        }
        Commands::Features {
            input,
            language,
            format,
        } => {
            let config = load_config(cli.config.as_deref(), None)?;
            detect::features(&config, &input, language.as_deref(), format)
        }
        Commands::Scan {
            path,
            format,
            model,
            workers,
        } => {
            let config = load_config(cli.config.as_deref(), model)?;
            scan::run(&config, &path, format, workers)
        }
        Commands::Languages => {
            languages();
            Ok(())
        }
        Commands::Init => init::run(),
    }
}

/// Resolve settings; a `--model` flag beats every config source.
fn load_config(config_path: Option<&Path>, model: Option<PathBuf>) -> Result<DetectorConfig> {
    let mut config = DetectorConfig::load(config_path)?;
    if model.is_some() {
        config.model_path = model;
    }
    Ok(config)
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

/// Read the submission from a file or stdin.
fn read_input(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("Failed to read stdin")?;
        Ok(code)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))
    }
}

fn languages() {
    println!("{}", style("Supported languages").bold());
    for language in Language::SUPPORTED {
        println!(
            "  {} comments: {:<10} structure: {:?}",
            style(format!("{:<12}", language.as_str())).cyan(),
            format!("{:?}", language.comment_style()).to_lowercase(),
            language.structure_profile()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_cli_parses_detect() {
        let cli = Cli::try_parse_from([
            "codeorigin",
            "detect",
            "app.py",
            "--format",
            "json",
            "-l",
            "python",
        ])
        .expect("valid args");
        match cli.command {
            Commands::Detect {
                input,
                language,
                format,
                ..
            } => {
                assert_eq!(input, PathBuf::from("app.py"));
                assert_eq!(language.as_deref(), Some("python"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["codeorigin", "scan", ".", "--format", "sarif"]).is_err());
    }

    #[test]
    fn test_stdin_marker() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("main.py")));
    }
}
