//! User configuration, read from `config.toml` in the platform config dir.

use crate::calculator::AngleMode;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Angle unit a new session starts in.
    pub angle_mode: AngleMode,
    /// Show the live preview line while typing.
    pub show_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Radians,
            show_preview: true,
        }
    }
}

impl Config {
    /// Default location: `$XDG_CONFIG_HOME/smartcalc/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smartcalc").join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid calculator config")
    }

    /// Load the config from `path`, or from the default location.
    ///
    /// A missing file yields the defaults. An explicitly given path must
    /// exist and parse; a broken file at the default location is logged
    /// and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            return Self::from_toml(&text);
        }

        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Self::from_toml(&text))
        {
            Ok(config) => Ok(config),
            Err(error) => {
                warn!(path = %path.display(), "ignoring config: {error:#}");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert!(config.show_preview);
    }

    #[test]
    fn test_parse() {
        let config = Config::from_toml("angle_mode = \"degrees\"\nshow_preview = false\n").unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert!(!config.show_preview);
    }

    #[test]
    fn test_invalid() {
        assert!(Config::from_toml("angle_mode = \"gradians\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("smartcalc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "angle_mode = \"degrees\"").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);

        assert!(Config::load(Some(Path::new("/nonexistent/smartcalc.toml"))).is_err());
    }
}
