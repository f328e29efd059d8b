//! Configuration management
//!
//! Settings are layered: built-in defaults, then the user config file, then a
//! file named by `--config` / `FAC_CONFIG`, then command-line flags. Config
//! only shapes presentation; it never stores parameter values.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::yaml::{parse_yaml_file, YamlError};

/// Default braille canvas width (pixels)
pub const DEFAULT_CHART_WIDTH: u32 = 120;

/// Default braille canvas height (pixels)
pub const DEFAULT_CHART_HEIGHT: u32 = 48;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("failed to load config file {path}")]
    #[diagnostic(code(fac::config::load))]
    Load {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: YamlError,
    },

    #[error("config file not found: {0}")]
    #[diagnostic(
        code(fac::config::missing),
        help("remove --config / FAC_CONFIG or point it at an existing file")
    )]
    Missing(PathBuf),
}

/// Chart dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

/// One config layer as it appears on disk; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub color: Option<bool>,
    pub chart: Option<ChartConfig>,
}

/// Effective configuration after all layers are merged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Default output format name (parsed by the CLI)
    pub format: Option<String>,
    pub color: bool,
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            chart: ChartConfig::default(),
        }
    }
}

impl Config {
    /// Path of the per-user config file, if a home directory can be found
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fac").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load defaults, the user config and an optional explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                config.merge(Self::read_layer(&path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            config.merge(Self::read_layer(path)?);
        }

        Ok(config)
    }

    fn read_layer(path: &Path) -> Result<ConfigFile, ConfigError> {
        if std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false) {
            return Ok(ConfigFile::default());
        }
        parse_yaml_file(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay a config layer; fields it sets win
    pub fn merge(&mut self, layer: ConfigFile) {
        if layer.format.is_some() {
            self.format = layer.format;
        }
        if let Some(color) = layer.color {
            self.color = color;
        }
        if let Some(chart) = layer.chart {
            self.chart = chart;
        }
    }
}
