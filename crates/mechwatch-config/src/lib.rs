//! Configuration file loading for the mechwatch clock.
//!
//! Settings live in `config.toml` under the platform config directory. The
//! file is optional and read-only: missing keys fall back to defaults and
//! nothing is ever written back.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use mechwatch_core::{ColorTheme, TimeFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Default delay between frames.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gear color theme.
    pub color_theme: ColorTheme,
    /// Digital readout time format.
    pub time_format: TimeFormat,
    /// Start with the gears frozen.
    pub start_paused: bool,
    /// Show the digital readout line.
    pub show_readout: bool,
    /// Delay between frames in milliseconds.
    pub frame_interval_ms: u64,
    /// Log level: error, warn, info, debug or trace.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_theme: ColorTheme::default(),
            time_format: TimeFormat::default(),
            start_paused: false,
            show_readout: true,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            log_level: "info".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "mechwatch")
}

impl Config {
    /// Location of the configuration file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Location of the log file.
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join("mechwatch.log"))
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> ConfigResult<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse configuration TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Frame interval, never zero.
    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::from_toml_str("").expect("parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.frame_interval_ms(), 16);
        assert!(config.show_readout);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            color_theme = "magenta"
            time_format = "12h"
            start_paused = true
            "#,
        )
        .expect("parses");

        assert_eq!(config.color_theme, ColorTheme::Magenta);
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
        assert!(config.start_paused);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let config = Config::from_toml_str("frame_interval_ms = 0").expect("parses");
        assert_eq!(config.frame_interval_ms(), 1);
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        assert!(Config::from_toml_str(r#"color_theme = "plaid""#).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("mechwatch-test-missing").join("config.toml");
        let config = Config::load_from(&path).expect("missing file is fine");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("mechwatch-test-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("config.toml");
        fs::write(&path, "frame_interval_ms = \"soon\"").expect("write config");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(format!("{err}").contains("config.toml"));

        let _ = fs::remove_dir_all(&dir);
    }
}
