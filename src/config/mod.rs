// src/config/mod.rs
use crate::error::PlmError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// How many samples are on screen at once.
    pub screen_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            screen_capacity: crate::processing::viewport::DEFAULT_SCREEN_CAPACITY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// PLM events per hour at or above which the report is flagged.
    pub eph_alert_threshold: f64,
    pub bin_minutes: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            eph_alert_threshold: 25.0,
            bin_minutes: 60,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_debug_logging: bool,
    /// File name under `logs/`.
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_debug_logging: false,
            log_file: "plm_analyzer.log".to_string(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PlmError> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| PlmError::Config(format!("Failed to read config file: {}", e)))?;

    serde_yaml::from_str(&config_str)
        .map_err(|e| PlmError::Config(format!("Failed to parse config file: {}", e)))
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), PlmError> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| PlmError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, yaml)
        .map_err(|e| PlmError::Config(format!("Failed to write config file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = serde_yaml::from_str("viewer:\n  screen_capacity: 50\n").unwrap();
        assert_eq!(config.viewer.screen_capacity, 50);
        assert_eq!(config.report, ReportConfig::default());
        assert!(!config.logging.enable_debug_logging);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plm.yaml");
        let mut config = Config::default();
        config.report.eph_alert_threshold = 15.0;
        config.logging.enable_debug_logging = true;

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn unreadable_config_is_a_config_error() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, PlmError::Config(_)));
    }
}
