// src/config.rs

//! Clock configuration, read from YAML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::settings::{fps_cap_from, Settings};
use crate::error::{ClockError, Result};
use crate::util::log::DEFAULT_LOG_DIR;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "GLYPH_CLOCK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./glyph-clock.yml";
pub const DEFAULT_PROPERTIES_PATH: &str = "./properties.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Display refresh rate the host delivers frames at, in Hz.
    pub refresh_rate: f64,
    /// Properties file watched for host pushes. `null` disables watching.
    pub properties_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
    pub log_dir: PathBuf,
    /// Settings in effect before any property push arrives.
    pub settings: Settings,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 60.0,
            properties_path: Some(PathBuf::from(DEFAULT_PROPERTIES_PATH)),
            poll_interval_ms: 1000,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            settings: Settings::default(),
        }
    }
}

impl ClockConfig {
    /// Load from `$GLYPH_CLOCK_CONFIG`, else `./glyph-clock.yml` if present,
    /// else defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.refresh_rate.is_finite() && self.refresh_rate > 0.0) {
            return Err(ClockError::Config(format!(
                "refresh_rate must be positive, got {}",
                self.refresh_rate
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be at least 1".into());
        }
        if fps_cap_from(self.settings.fps_cap).is_none() {
            return Err(ClockError::Config(format!(
                "settings.fps_cap must be zero or a usable positive rate, got {}",
                self.settings.fps_cap
            )));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.refresh_rate)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = ClockConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let config = ClockConfig::from_yaml(
            "refresh_rate: 30\nproperties_path: null\nsettings:\n  fps_cap: 10\n  is_light_theme: true\n",
        )
        .unwrap();
        assert_eq!(config.refresh_rate, 30.0);
        assert!(config.properties_path.is_none());
        assert_eq!(config.settings.fps_cap, 10.0);
        assert!(config.settings.is_light_theme);
        assert_eq!(config.settings.highlight_color, "#f57c00");
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ClockConfig::from_yaml("refresh_rate: 0"),
            Err(ClockError::Config(_))
        ));
        assert!(matches!(
            ClockConfig::from_yaml("poll_interval_ms: 0"),
            Err(ClockError::Config(_))
        ));
        assert!(matches!(
            ClockConfig::from_yaml("settings:\n  fps_cap: -5"),
            Err(ClockError::Config(_))
        ));
        assert!(matches!(
            ClockConfig::from_yaml("settings:\n  fps_cap: 1e-320"),
            Err(ClockError::Config(_))
        ));
        assert!(matches!(
            ClockConfig::from_yaml("refresh_rate: [1, 2]"),
            Err(ClockError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_rate: 120\nlog_dir: /tmp/glyph-logs").unwrap();
        let config = ClockConfig::from_file(file.path()).unwrap();
        assert_eq!(config.refresh_rate, 120.0);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/glyph-logs"));
        assert!((config.refresh_interval().as_secs_f64() - 1.0 / 120.0).abs() < 1e-6);
    }
}
