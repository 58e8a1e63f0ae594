//! Command-line interface definitions for dupescan.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan a single directory
//! dupescan ~/Downloads
//!
//! # Include subdirectories
//! dupescan -R ~/Downloads
//!
//! # JSON output for scripting
//! dupescan -R ~/Downloads --output json
//!
//! # Verbose mode for debugging
//! dupescan -vv ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search a directory for duplicate files.
///
/// Files are compared by size first and by BLAKE3 content hash second. In
/// each set of identical files the earliest-modified one is kept as the
/// original and all others are reported as duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The directory in which to search for duplicates
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Search subdirectories recursively
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Ignore symbolic links
    ///
    /// By default links are resolved: a link to a file is scanned and a
    /// link to a directory is searched. Symlink loops are reported as errors.
    #[arg(long)]
    pub skip_symlinks: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH", env = "DUPESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
