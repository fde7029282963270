//! Configuration Management
//!
//! Loads trace driver settings from TOML files:
//! - Buffer settings (overflow policy, capacity)
//! - Output settings (format, color)
//!
//! Every field has a default, so an empty file is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::errors::OverrunError;
use crate::ring::{Policy, MAX_CAPACITY};

/// Default file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "overrun.toml";

/// Output format for trace steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON array for scripting
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub buffer: BufferConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferConfig {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Colorize text output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            capacity: default_capacity(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

fn default_capacity() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load from `path`, or from the default locations when no path is given.
    ///
    /// An explicit path must exist. Missing default files fall back to
    /// built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| {
                    OverrunError::Config(format!("Failed to read config from {}: {}", p, e))
                })?;
                Self::parse(&content).with_context(|| format!("Failed to parse config {}", p))?
            }
            None => match Self::default_paths()
                .into_iter()
                .find_map(|p| std::fs::read_to_string(&p).ok().map(|c| (p, c)))
            {
                Some((p, content)) => {
                    debug!(path = %p.display(), "loading config");
                    Self::parse(&content)
                        .with_context(|| format!("Failed to parse config {}", p.display()))?
                }
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text without touching the filesystem.
    pub fn parse(content: &str) -> std::result::Result<Self, OverrunError> {
        toml::from_str(content).map_err(|e| OverrunError::Config(e.to_string()))
    }

    pub fn validate(&self) -> std::result::Result<(), OverrunError> {
        if self.buffer.capacity == 0 {
            return Err(OverrunError::Config(
                "buffer.capacity must be at least 1".to_string(),
            ));
        }
        if self.buffer.capacity > MAX_CAPACITY {
            return Err(OverrunError::Config(format!(
                "buffer.capacity must be at most {}",
                MAX_CAPACITY
            )));
        }
        Ok(())
    }

    /// Serialize back to TOML, as printed by `overrun config`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("overrun").join("config.toml"));
        }
        paths
    }
}
