use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::timestamp::NegativeTimestampPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// What to do with timestamps shifted before zero
    #[serde(default)]
    pub negative_timestamp_policy: NegativeTimestampPolicy,

    /// Suffix inserted before the extension of generated output files
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Output directory used when a whole directory is processed
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// Maximum number of files re-timed at the same time in directory mode
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_suffix() -> String {
    "_sync".to_string()
}

fn default_output_directory() -> String {
    "./output/".to_string()
}

fn default_concurrent_files() -> usize {
    4
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(anyhow!("Output suffix must not be empty, the input file would be overwritten"));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(anyhow!("Output suffix must not contain path separators: {}", self.output_suffix));
        }

        if self.output_directory.trim().is_empty() {
            return Err(anyhow!("Output directory must not be empty"));
        }

        if self.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        Ok(())
    }

    /// Load the configuration from a JSON file, writing the defaults there if it doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            negative_timestamp_policy: NegativeTimestampPolicy::default(),
            output_suffix: default_output_suffix(),
            output_directory: default_output_directory(),
            concurrent_files: default_concurrent_files(),
            log_level: LogLevel::default(),
        }
    }
}
