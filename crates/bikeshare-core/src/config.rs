use crate::filters::City;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from default path (~/.config/bikeshare/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write current configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bikeshare")
            .join("config.toml")
    }

    /// Full path of the CSV file for a city.
    pub fn city_path(&self, city: City) -> PathBuf {
        let file = match city {
            City::Chicago => &self.data.chicago_file,
            City::NewYorkCity => &self.data.new_york_city_file,
            City::Washington => &self.data.washington_file,
        };
        self.data.data_dir.join(file)
    }
}

/// Where the trip CSV files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the city files. Relative paths resolve against the
    /// working directory.
    pub data_dir: PathBuf,
    pub chicago_file: String,
    pub new_york_city_file: String,
    pub washington_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            chicago_file: "chicago.csv".into(),
            new_york_city_file: "new_york_city.csv".into(),
            washington_file: "washington.csv".into(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown per raw-data page.
    pub page_size: usize,
    /// Print the "This took N seconds." line after each report.
    pub show_timings: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            show_timings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("new_york_city.csv"));
        assert!(toml_str.contains("page_size = 5"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.display.page_size, config.display.page_size);
        assert_eq!(parsed.data.chicago_file, config.data.chicago_file);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[display]\npage_size = 10\n").unwrap();
        assert_eq!(parsed.display.page_size, 10);
        assert!(parsed.display.show_timings);
        assert_eq!(parsed.data.washington_file, "washington.csv");
    }

    #[test]
    fn test_city_path() {
        let mut config = AppConfig::default();
        config.data.data_dir = PathBuf::from("/srv/bikes");
        assert_eq!(
            config.city_path(City::NewYorkCity),
            PathBuf::from("/srv/bikes/new_york_city.csv")
        );
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.display.show_timings = false;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(!loaded.display.show_timings);
    }
}
