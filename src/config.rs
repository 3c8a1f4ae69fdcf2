use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "SHINKANSEN_CONFIG";
/// Environment variable overriding `dataset_path`.
pub const DATA_ENV: &str = "SHINKANSEN_DATA";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "shinkansen.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Station table loaded at startup; `generate_sample` writes the default.
    pub dataset_path: PathBuf,
    /// Year the dashboard delta compares the latest year against.
    pub reference_year: i32,
    /// Rows in the "Top Prefectures" table.
    pub top_n: usize,
    /// Slider step of the year filter.
    pub year_step: i32,
    /// Optional picture shown under the dashboard map.
    pub banner_image: Option<PathBuf>,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("shinkansen.csv"),
            reference_year: 2016,
            top_n: 5,
            year_step: 10,
            banner_image: None,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Parse a config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// Resolve the config: `$SHINKANSEN_CONFIG`, then `./shinkansen.json`, then
/// defaults.  `$SHINKANSEN_DATA` overrides the dataset path in every case.
pub fn load_config() -> Result<DashboardConfig> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let mut config = match explicit {
        Some(path) => DashboardConfig::from_file(&path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            DashboardConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            log::debug!("No config file found, using defaults");
            DashboardConfig::default()
        }
    };

    if let Some(data) = std::env::var_os(DATA_ENV) {
        config.dataset_path = PathBuf::from(data);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shinkansen.json");
        std::fs::write(&path, r#"{ "reference_year": 2015, "top_n": 3 }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.reference_year, 2015);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.year_step, 10);
        assert_eq!(config.dataset_path, PathBuf::from("shinkansen.csv"));
    }

    #[test]
    fn default_dataset_is_the_generated_sample() {
        let config = DashboardConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("shinkansen.csv"));
        assert_eq!(config.dataset_path.extension().and_then(|e| e.to_str()), Some("csv"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ reference_year: ").unwrap();
        assert!(DashboardConfig::from_file(&path).is_err());
    }
}
