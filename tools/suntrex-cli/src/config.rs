//! CLI configuration.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use suntrex_catalog::search::{SortOption, DEFAULT_PAGE_SIZE};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["suntrex.toml", ".suntrex.toml", "suntrex.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Browse defaults.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content, is_json(path))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse config text, TOML unless `json` is set.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The configured default sort, falling back to relevance.
    pub fn default_sort(&self) -> SortOption {
        SortOption::from_str(&self.browse.default_sort).unwrap_or_default()
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.browse.page_size == 0 {
            errors.push("browse.page_size must be at least 1".to_string());
        } else if self.browse.page_size > 100 {
            warnings.push(format!(
                "browse.page_size {} is large for a product grid",
                self.browse.page_size
            ));
        }

        if let Err(e) = SortOption::from_str(&self.browse.default_sort) {
            errors.push(format!("browse.default_sort: {}", e));
        }

        match self.catalog.path.as_deref() {
            None => warnings.push("catalog.path is not set; pass --catalog to each command".to_string()),
            Some(path) if !path.ends_with(".json") => {
                warnings.push(format!("catalog.path '{}' is not a .json file", path))
            }
            Some(_) => {}
        }

        if tracing_subscriber::EnvFilter::try_new(&self.log.level).is_err() {
            errors.push(format!("log.level '{}' is not a valid filter", self.log.level));
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Browse defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort key used when none is given.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> String {
    SortOption::Relevance.as_str().to_string()
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: default_sort(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown log format: {} (expected human or json)", other),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `suntrex_catalog=debug`.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::Human,
        }
    }
}

/// Generate a default suntrex.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Suntrex catalog browser configuration

[catalog]
path = "{catalog_path}"

[browse]
page_size = {page_size}
# relevance, price-asc, price-desc, stock or rating
default_sort = "relevance"

[log]
level = "info"
# human or json
format = "human"
"#,
        catalog_path = catalog_path,
        page_size = DEFAULT_PAGE_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = CliConfig::parse("", false).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.browse.page_size, 12);
        assert_eq!(config.default_sort(), SortOption::Relevance);
        assert_eq!(config.log.format, LogFormat::Human);
    }

    #[test]
    fn test_generated_config_parses_clean() {
        let config = CliConfig::parse(&generate_default_config("data/catalog.json"), false).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("data/catalog.json"));

        let (errors, warnings) = config.check();
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            r#"{"browse": {"page_size": 24, "default_sort": "price-asc"}, "log": {"format": "json"}}"#,
            true,
        )
        .unwrap();
        assert_eq!(config.browse.page_size, 24);
        assert_eq!(config.default_sort(), SortOption::PriceAsc);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.catalog.path = Some("catalog.json".to_string());
        config.browse.page_size = 0;
        config.browse.default_sort = "cheapest".to_string();

        let (errors, _) = config.check();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("page_size"));
        assert!(errors[1].contains("cheapest"));
        assert_eq!(config.default_sort(), SortOption::Relevance);
    }

    #[test]
    fn test_check_warns_without_catalog() {
        let (errors, warnings) = CliConfig::default().check();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
