//! dupescan - duplicate file detector
//!
//! Walks a directory (optionally recursively), groups files by size and then
//! by BLAKE3 content hash, and reports every copy that is newer than the
//! earliest-modified file holding the same content.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bytesize::ByteSize;

use cli::{Cli, OutputFormat};
use config::Config;
use duplicates::identify_duplicates;
use error::ExitCode;
use output::{write_header, JsonOutput, ScanReport, TextOutput};
use scanner::path_utils::absolutize;
use scanner::Walker;
use signal::ShutdownHandler;

/// Run the application for parsed command-line arguments.
///
/// The report goes to stdout.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the report
/// cannot be written. Per-file failures are part of the report instead.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(&cli).context("Failed to load configuration")?;
    let handler = signal::install_handler();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_scan(&cli.dir, &config, &handler, &mut out)
}

/// Scan `dir` and write the report to `writer`.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or writing fails.
pub fn run_scan<W: Write>(
    dir: &Path,
    config: &Config,
    handler: &ShutdownHandler,
    writer: &mut W,
) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let root = absolutize(dir).unwrap_or_else(|_| cwd.join(dir));

    if config.output == OutputFormat::Text {
        write_header(writer, &cwd, &root).context("Failed to write output")?;
        writer.flush().context("Failed to write output")?;
    }

    let mut result = Walker::new(dir, config.walker_config())
        .with_shutdown_flag(handler.get_flag())
        .walk();
    log::info!(
        "Scanned {} files ({}), {} errors",
        result.signatures.len(),
        ByteSize(result.total_size()),
        result.errors.len()
    );

    let mut duplicates =
        identify_duplicates(&result.signatures).with_shutdown_flag(handler.get_flag());
    let found: Vec<_> = duplicates.by_ref().collect();
    result.errors.append(&mut duplicates.take_failures());
    let stats = duplicates.stats();

    let interrupted = result.interrupted || handler.is_shutdown_requested();
    log::info!(
        "Found {} duplicates in {} groups, {} reclaimable",
        stats.duplicate_files,
        stats.duplicate_groups,
        ByteSize(stats.reclaimable_space)
    );

    let report = ScanReport::new(&root, &result.errors, &found)
        .with_stats(stats)
        .with_files_scanned(result.signatures.len())
        .with_interrupted(interrupted);

    match config.output {
        OutputFormat::Text => TextOutput::new(&report)
            .write_to(writer)
            .context("Failed to write output")?,
        OutputFormat::Json => JsonOutput::new(&report)
            .write_to(writer, true)
            .context("Failed to write JSON output")?,
    }

    if interrupted {
        log::warn!("Scan interrupted, results are partial");
        Ok(ExitCode::Interrupted)
    } else {
        Ok(ExitCode::Success)
    }
}
