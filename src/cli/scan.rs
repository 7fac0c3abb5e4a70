//! Scan command - classify every source file under a directory

use anyhow::Result;
use codeorigin::config::DetectorConfig;
use codeorigin::pipeline::Detector;
use codeorigin::reporters::{self, OutputFormat};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}

/// Run the scan command
pub fn run(
    config: &DetectorConfig,
    path: &Path,
    format: OutputFormat,
    workers: Option<usize>,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.set_message(format!("Scanning {}...", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let progress = spinner.clone();
    let mut detector = Detector::from_config(config).with_progress(Box::new(
        move |file: &Path, done: usize, total: usize| {
            progress.set_message(format!("[{}/{}] {}", done, total, file.display()));
        },
    ));
    if let Some(workers) = workers {
        detector = detector.with_workers(workers);
    }

    let report = match detector.scan(path) {
        Ok(report) => report,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };

    spinner.finish_with_message(format!(
        "{}Classified {} files ({} skipped)",
        style("✓ ").green(),
        style(report.total_files).cyan(),
        style(report.skipped.len()).dim()
    ));

    print!("{}", reporters::render_scan(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
