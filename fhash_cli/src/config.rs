use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use fhash_core::{AlgorithmSet, DigestConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub hashing: DigestConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReportConfig {
    /// Directory that receives generated reports
    pub output_dir: PathBuf,
    /// Organization name printed on the report cover
    pub organization: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::data_dir()
                .map(|d| d.join("fhash/reports"))
                .unwrap_or_else(|| PathBuf::from(".fhash/reports")),
            organization: "Digital Forensics Laboratory".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, chunk_size: Option<usize>, algorithms: &[String]) {
        if let Some(size) = chunk_size {
            self.hashing.chunk_size = size;
        }
        if !algorithms.is_empty() {
            self.hashing.algorithms = Some(algorithms.to_vec());
        }
    }
}

/// Rejected `config set` input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValueError {
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Empty key")]
    EmptyKey,
}

impl ConfigValueError {
    fn invalid(key: &str, value: &str, expected: &'static str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("fhash/config.toml");
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fhash\\config.toml")
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join("fhash/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("FHASH_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = self.load_as_toml()?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        render_value(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
        let Some((last, sections)) = parts.split_last() else {
            return Err(ConfigValueError::EmptyKey.into());
        };

        let parsed_value = parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path).with_context(|| {
                format!("Failed to read {}", self.config_path.display())
            })?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert(toml::Value::Table(toml::map::Map::new()));
        }

        match current {
            toml::Value::Table(table) => {
                table.insert(last.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Cannot set value on non-table"),
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = self.load_as_toml()?;

        let mut items = Vec::new();
        collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    fn load_as_toml(&self) -> Result<toml::Value> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        Ok(toml::from_str(&toml_string)?)
    }
}

/// Simple values print as-is; arrays of simple values print comma separated
fn render_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        _ => None,
    }
}

fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
    if let toml::Value::Table(table) = value {
        for (key, val) in table {
            let new_prefix = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            collect_values(val, new_prefix, items);
        }
    } else if let Some(rendered) = render_value(value) {
        items.push((prefix, rendered));
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a value and convert it to the TOML type its key expects
fn parse_config_value(key: &str, value: &str) -> Result<toml::Value, ConfigValueError> {
    match key {
        "hashing.chunk_size" => match value.parse::<i64>() {
            Ok(size) if size >= 1 => Ok(toml::Value::Integer(size)),
            _ => Err(ConfigValueError::invalid(key, value, "a positive integer")),
        },
        "hashing.algorithms" => {
            let names = split_list(value);
            AlgorithmSet::from_names(&names).map_err(|_| {
                ConfigValueError::invalid(key, value, "a comma separated list of known algorithms")
            })?;
            Ok(toml::Value::Array(
                names.into_iter().map(toml::Value::String).collect(),
            ))
        }
        "hashing.excluded_extensions" => Ok(toml::Value::Array(
            split_list(value)
                .into_iter()
                .map(toml::Value::String)
                .collect(),
        )),
        "output.default_format" => match value {
            "text" | "json" | "csv" => Ok(toml::Value::String(value.to_string())),
            _ => Err(ConfigValueError::invalid(key, value, "one of text, json, csv")),
        },
        k if k.ends_with("_enabled") => value
            .parse::<bool>()
            .map(toml::Value::Boolean)
            .map_err(|_| ConfigValueError::invalid(key, value, "'true' or 'false'")),
        // Free-form text
        "report.organization" | "report.output_dir" => Ok(toml::Value::String(value.to_string())),
        _ => {
            if let Ok(b) = value.parse::<bool>() {
                Ok(toml::Value::Boolean(b))
            } else if let Ok(i) = value.parse::<i64>() {
                Ok(toml::Value::Integer(i))
            } else if let Ok(f) = value.parse::<f64>() {
                Ok(toml::Value::Float(f))
            } else {
                Ok(toml::Value::String(value.to_string()))
            }
        }
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chunk_size() {
        assert_eq!(
            parse_config_value("hashing.chunk_size", "4096").unwrap(),
            toml::Value::Integer(4096)
        );
        assert!(parse_config_value("hashing.chunk_size", "0").is_err());
        assert!(parse_config_value("hashing.chunk_size", "lots").is_err());
    }

    #[test]
    fn test_parse_algorithm_list() {
        let value = parse_config_value("hashing.algorithms", "md5, sha-256").unwrap();
        assert_eq!(render_value(&value).unwrap(), "md5,sha-256");

        let error = parse_config_value("hashing.algorithms", "md5,crc32").unwrap_err();
        assert!(matches!(error, ConfigValueError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_booleans_and_formats() {
        assert_eq!(
            parse_config_value("output.color_enabled", "false").unwrap(),
            toml::Value::Boolean(false)
        );
        assert!(parse_config_value("output.color_enabled", "nope").is_err());
        assert!(parse_config_value("output.default_format", "xml").is_err());
    }

    #[test]
    fn test_organization_stays_text() {
        assert_eq!(
            parse_config_value("report.organization", "1234").unwrap(),
            toml::Value::String("1234".to_string())
        );
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(Some(1024), &["md5".to_string()]);

        assert_eq!(config.hashing.chunk_size, 1024);
        assert_eq!(config.hashing.algorithms, Some(vec!["md5".to_string()]));

        config.apply_cli_overrides(None, &[]);
        assert_eq!(config.hashing.chunk_size, 1024);
    }
}
