//! Dashboard Configuration Module
//! Column names, histogram granularity and export settings, optionally read from JSON.

use crate::stats::GrowthMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Bucket count used for the circumference histogram.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("histogram_bins must be at least 1")]
    ZeroBins,
}

/// User-tunable settings. Every field has a default so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window_title: String,
    pub tree_column: String,
    pub age_column: String,
    pub circumference_column: String,
    pub histogram_bins: usize,
    pub growth_mode: GrowthMode,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Orange Tree Growth Visualization".to_string(),
            tree_column: "Tree".to_string(),
            age_column: "age".to_string(),
            circumference_column: "circumference".to_string(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            growth_mode: GrowthMode::Sequential,
            export_width: 1000,
            export_height: 700,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parse config from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: "<inline>".to_string(),
            source,
        })?;
        if config.histogram_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_orange_dataset() {
        let config = DashboardConfig::default();
        assert_eq!(config.tree_column, "Tree");
        assert_eq!(config.age_column, "age");
        assert_eq!(config.circumference_column, "circumference");
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.growth_mode, GrowthMode::Sequential);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            DashboardConfig::from_json(r#"{ "histogram_bins": 8, "growth_mode": "per_entity" }"#)
                .unwrap();
        assert_eq!(config.histogram_bins, 8);
        assert_eq!(config.growth_mode, GrowthMode::PerEntity);
        assert_eq!(config.tree_column, "Tree");
    }

    #[test]
    fn test_zero_bins_rejected() {
        let err = DashboardConfig::from_json(r#"{ "histogram_bins": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBins));
    }

    #[test]
    fn test_malformed_json() {
        let err = DashboardConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/orchard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
