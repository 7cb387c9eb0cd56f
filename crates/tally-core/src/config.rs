//! Tally configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the user override (~/.config/tally/config.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::analytics::DEFAULT_LABEL_THRESHOLD_PCT;
use crate::error::{Error, Result};
use crate::store::DEFAULT_FILE_NAME;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartsConfig {
    pub output_dir: PathBuf,
    pub label_threshold_pct: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptsConfig {
    pub max_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub charts: ChartsConfig,
    pub prompts: PromptsConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                path: PathBuf::from(DEFAULT_FILE_NAME),
            },
            charts: ChartsConfig {
                output_dir: PathBuf::from("charts"),
                label_threshold_pct: DEFAULT_LABEL_THRESHOLD_PCT,
                width: 800,
                height: 500,
            },
            prompts: PromptsConfig { max_attempts: 5 },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
        }
    }
}

impl Config {
    /// Load config: explicit path, else user override, else embedded defaults.
    ///
    /// An explicit path that does not exist is an error; a missing user
    /// override is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::parse(DEFAULT_CONFIG)?;

        let override_path = match explicit {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = override_path {
            debug!("Loading config override from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            config.apply(parse_raw(&content)?)?;
        }

        Ok(config)
    }

    /// Parse a complete config from TOML, starting from the built-in values
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply(parse_raw(content)?)?;
        Ok(config)
    }

    fn apply(&mut self, raw: RawConfig) -> Result<()> {
        if let Some(store) = raw.store {
            if let Some(path) = store.path {
                self.store.path = path;
            }
        }

        if let Some(charts) = raw.charts {
            if let Some(dir) = charts.output_dir {
                self.charts.output_dir = dir;
            }
            if let Some(pct) = charts.label_threshold_pct {
                if pct > 100 {
                    return Err(Error::Config(format!(
                        "charts.label_threshold_pct must be 0-100 (got {})",
                        pct
                    )));
                }
                self.charts.label_threshold_pct = pct;
            }
            if let Some(width) = charts.width {
                self.charts.width = width;
            }
            if let Some(height) = charts.height {
                self.charts.height = height;
            }
        }

        if let Some(prompts) = raw.prompts {
            if let Some(max) = prompts.max_attempts {
                if max == 0 {
                    return Err(Error::Config(
                        "prompts.max_attempts must be at least 1".to_string(),
                    ));
                }
                self.prompts.max_attempts = max;
            }
        }

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        Ok(())
    }
}

/// Per-user override location (~/.config/tally/config.toml on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    store: Option<RawStore>,
    charts: Option<RawCharts>,
    prompts: Option<RawPrompts>,
    server: Option<RawServer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStore {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCharts {
    output_dir: Option<PathBuf>,
    label_threshold_pct: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPrompts {
    max_attempts: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

fn parse_raw(content: &str) -> Result<RawConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}
