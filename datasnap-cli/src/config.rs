//! CLI configuration management

use anyhow::{bail, Context as _, Result};
use clap::ValueEnum;
use colored::Colorize;
use config::{Config as ConfigLoader, Environment, File, FileFormat};
use datasnap_core::SignificanceLevel;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::{print_field, print_section, OutputFormat, TableDisplay};

/// Prefix of environment variables that override file settings,
/// e.g. `DATASNAP_SETTINGS__DEFAULT_ALPHA=0.01`.
pub const ENV_PREFIX: &str = "DATASNAP";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl CliConfig {
    /// Load configuration layered as defaults, then the TOML file at `path`,
    /// then `DATASNAP_*` environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let defaults = ConfigLoader::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let config = ConfigLoader::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load config from {:?}", path))?;

        config
            .try_deserialize()
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Read only the TOML file at `path`, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "datasnap", "datasnap")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set a `settings.*` key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let setting = key.strip_prefix("settings.").unwrap_or(key);
        let settings = &mut self.settings;

        match setting {
            "default_alpha" => {
                let alpha: f64 = value.parse().context("Invalid number")?;
                SignificanceLevel::new(alpha)?;
                settings.default_alpha = alpha;
            }
            "output_format" => {
                OutputFormat::from_str(value, true)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Invalid output format '{}'", value))?;
                settings.output_format = value.to_ascii_lowercase();
            }
            "top_values" => settings.top_values = value.parse().context("Invalid number")?,
            "histogram_bins" => {
                let bins: usize = value.parse().context("Invalid number")?;
                if bins == 0 {
                    bail!("histogram_bins must be at least 1");
                }
                settings.histogram_bins = bins;
            }
            "anomaly_threshold" => {
                let threshold: f64 = value.parse().context("Invalid number")?;
                if !threshold.is_finite() || threshold < 0.0 {
                    bail!("anomaly_threshold must be a non-negative number");
                }
                settings.anomaly_threshold = threshold;
            }
            "no_color" => settings.no_color = value.parse().context("Invalid boolean value")?,
            _ => bail!("Unknown setting: {}", key),
        }
        Ok(())
    }

    /// Key/value pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let s = &self.settings;
        vec![
            ("default_alpha", s.default_alpha.to_string()),
            ("output_format", s.output_format.clone()),
            ("top_values", s.top_values.to_string()),
            ("histogram_bins", s.histogram_bins.to_string()),
            ("anomaly_threshold", s.anomaly_threshold.to_string()),
            ("no_color", s.no_color.to_string()),
        ]
    }
}

impl TableDisplay for CliConfig {
    fn display_single(&self) {
        print_section("Configuration");
        println!("{}", "Settings:".cyan());
        for (key, value) in self.entries() {
            print_field(key, &value);
        }
    }

    fn display_compact(&self) {
        for (key, value) in self.entries() {
            println!("settings.{}={}", key, value);
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Significance level used when `--alpha` is not given
    #[serde(default = "default_alpha")]
    pub default_alpha: f64,

    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Most frequent values shown per categorical column
    #[serde(default = "default_top_values")]
    pub top_values: usize,

    /// Bins for `describe --histogram`
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// IQR multiplier for `anomalies`
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_alpha: default_alpha(),
            output_format: default_output_format(),
            top_values: default_top_values(),
            histogram_bins: default_histogram_bins(),
            anomaly_threshold: default_anomaly_threshold(),
            no_color: false,
        }
    }
}

fn default_alpha() -> f64 {
    SignificanceLevel::DEFAULT
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_top_values() -> usize {
    datasnap_stats::descriptive::DEFAULT_TOP_VALUES
}

fn default_histogram_bins() -> usize {
    10
}

fn default_anomaly_threshold() -> f64 {
    datasnap_stats::DEFAULT_IQR_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_alpha, 0.05);
        assert_eq!(settings.output_format, "table");
        assert_eq!(settings.top_values, 5);
        assert_eq!(settings.histogram_bins, 10);
        assert_eq!(settings.anomaly_threshold, 1.5);
        assert!(!settings.no_color);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.set("settings.default_alpha", "0.01").unwrap();
        config.set("top_values", "3").unwrap();
        config.set("output_format", "JSON").unwrap();
        config.save(&path).unwrap();

        let reloaded = CliConfig::load_file(&path).unwrap();
        assert_eq!(reloaded.settings.default_alpha, 0.01);
        assert_eq!(reloaded.settings.top_values, 3);
        assert_eq!(reloaded.settings.output_format, "json");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nhistogram_bins = 4\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.settings.histogram_bins, 4);
        assert_eq!(config.settings.top_values, 5);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CliConfig::default();
        assert!(config.set("default_alpha", "1.5").is_err());
        assert!(config.set("default_alpha", "abc").is_err());
        assert!(config.set("histogram_bins", "0").is_err());
        assert!(config.set("anomaly_threshold", "-2").is_err());
        assert!(config.set("timeout_secs", "30").is_err());
        assert!(config.set("output_format", "xml").is_err());
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_entries_order() {
        let keys: Vec<&str> = CliConfig::default().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys[0], "default_alpha");
        assert_eq!(keys.len(), 6);
    }
}
