//! Server configuration.
//!
//! Values come from built-in defaults, optionally overlaid by a YAML file,
//! then by command-line flags (which also read `FILESERV_*` environment
//! variables, see `main.rs`).

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub logging: LoggingConfig,
}

/// Listening socket settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// First port tried.
    pub port: u16,
    /// How many consecutive ports to try when the address is in use.
    pub port_attempts: u16,
}

/// Settings a single connection cycle needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory allow-listed files are served from.
    pub root: PathBuf,
    /// Header blocks larger than this are answered with 400.
    pub max_header_bytes: usize,
    pub read_chunk_size: usize,
    pub transfer_chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1701,
            port_attempts: 100,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            max_header_bytes: 8192,
            read_chunk_size: 1024,
            transfer_chunk_size: 8192,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration, reading `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };

        Ok(cfg)
    }

    /// Parses a YAML document. Missing sections and keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(text)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port_attempts == 0 {
            bail!("server.port_attempts must be at least 1");
        }
        if self.static_files.max_header_bytes == 0 {
            bail!("static_files.max_header_bytes must be non-zero");
        }
        if self.static_files.read_chunk_size == 0 || self.static_files.transfer_chunk_size == 0 {
            bail!("static_files chunk sizes must be non-zero");
        }
        self.log_level()?;
        Ok(())
    }

    /// The configured maximum log level.
    pub fn log_level(&self) -> Result<Level> {
        self.logging
            .level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.logging.level))
    }
}
