//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: the one given with `--config`, or `config.toml` in the
//!    platform config directory if present
//! 3. Environment variables prefixed with `DUPESCAN_` (e.g. `DUPESCAN_RECURSIVE=true`)
//! 4. Command-line flags
//!
//! Flags can only switch options on; they never turn off something a file
//! or the environment enabled.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::scanner::WalkerConfig;

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "DUPESCAN_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Ignore symbolic links while walking.
    pub skip_symlinks: bool,
    /// Report format.
    pub output: OutputFormat,
}

/// Errors that can occur while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A provider produced a value that does not fit the schema.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

impl Config {
    /// Build the layered figment for an optional config file.
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration for a CLI invocation, flags applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file passed with `--config` is missing
    /// or any layer holds an invalid value. A broken file at the default
    /// location is logged and skipped instead.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config = match &cli.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.clone()));
                }
                Self::figment(Some(path)).extract().map_err(Box::new)?
            }
            None => Self::load_default()?,
        };

        log::debug!("Configuration: {:?}", config);
        Ok(config.apply_cli(cli))
    }

    fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path().filter(|p| p.is_file()) {
            match Self::figment(Some(&path)).extract() {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Ignoring config file {}: {}", path.display(), e);
                }
            }
        }
        Ok(Self::figment(None).extract().map_err(Box::new)?)
    }

    /// Overlay command-line flags.
    #[must_use]
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        self.recursive |= cli.recursive;
        self.skip_symlinks |= cli.skip_symlinks;
        if let Some(output) = cli.output {
            self.output = output;
        }
        self
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.recursive, self.skip_symlinks)
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupescan").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
