//! Configuration file handling

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Timeout settings used to size a session's wait budget
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Time allowed for the program under test to start and halt the first time
    #[serde(default = "default_startup")]
    pub startup_secs: u64,

    /// Time allowed per expected stop event
    #[serde(default = "default_per_stop")]
    pub per_stop_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            startup_secs: default_startup(),
            per_stop_secs: default_per_stop(),
        }
    }
}

fn default_startup() -> u64 {
    10
}
fn default_per_stop() -> u64 {
    5
}

/// Report configuration
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Print every check, not only failures
    #[serde(default)]
    pub verbose: bool,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Total time a driver should wait for a session expecting `stops` stop events
    pub fn wait_budget(&self, stops: usize) -> Duration {
        let per_stop = self.timeouts.per_stop_secs.saturating_mul(stops as u64);
        Duration::from_secs(self.timeouts.startup_secs.saturating_add(per_stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeouts.startup_secs, 10);
        assert_eq!(config.timeouts.per_stop_secs, 5);
        assert!(config.report.color);
        assert!(!config.report.verbose);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[timeouts]\nper_stop_secs = 2\n").unwrap();
        assert_eq!(config.timeouts.per_stop_secs, 2);
        assert_eq!(config.timeouts.startup_secs, 10);
        assert!(config.report.color);
    }

    #[test]
    fn test_wait_budget() {
        let config = Config::default();
        assert_eq!(config.wait_budget(3), Duration::from_secs(25));
        assert_eq!(config.wait_budget(0), Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts\nstartup_secs = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
