//! Dashboard configuration: an optional JSON file plus CLI overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default catalog file name, as published on Kaggle.
pub const DEFAULT_CATALOG: &str = "turkey_earthquakes(1915-2024_feb).csv";

/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub default_year_start: i32,
    pub default_magnitude_min: f64,
    pub default_depth_max: f64,
    /// Upper limit of the depth slider, in km.
    pub depth_slider_cap: f64,
    /// Initial scatter sample, 10–100.
    pub sample_percent: u8,
    pub sample_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            default_year_start: 2000,
            default_magnitude_min: 3.5,
            default_depth_max: 100.0,
            depth_slider_cap: 200.0,
            sample_percent: 50,
            sample_seed: 42,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    }

    /// Resolve the effective config: file (if any), then CLI catalog override.
    pub fn resolve(config_path: Option<&Path>, catalog: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(catalog) = catalog {
            config.catalog_path = catalog;
        }
        log::debug!("resolved config: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"default_year_start": 1990, "sample_percent": 30}}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.default_year_start, 1990);
        assert_eq!(config.sample_percent, 30);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG));
        assert_eq!(config.depth_slider_cap, 200.0);
    }

    #[test]
    fn cli_catalog_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"catalog_path": "from_file.csv"}}"#).unwrap();

        let config =
            AppConfig::resolve(Some(file.path()), Some(PathBuf::from("from_cli.parquet"))).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("from_cli.parquet"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "not json").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse JSON config"));
    }
}
