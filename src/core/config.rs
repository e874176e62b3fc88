use crate::{PaleotaxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub resolution: ResolutionConfig,
    pub audit: AuditConfig,
    pub timescale: TimescaleConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// PBDB data service endpoint for taxon lists
    pub base_url: String,
    /// Field delimiter of the taxon table
    pub delimiter: char,
    pub columns: SourceColumns,
}

/// Header names of the taxon table columns the resolver reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub accepted_no: String,
    pub accepted_name: String,
    pub accepted_rank: String,
    pub parent_no: String,
    pub firstapp_max_ma: String,
    pub lastapp_min_ma: String,
    pub is_extant: String,
    pub difference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Worker threads (0 = all available cores)
    pub threads: usize,
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Emit an OK line for genera whose duplicates are all subgenera
    pub report_subgenera: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimescaleConfig {
    pub url: String,
    pub name_column: String,
    pub level_column: String,
    pub base_age_column: String,
    pub top_age_column: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Field delimiter of written lineage tables
    pub delimiter: char,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://paleobiodb.org/data1.2/taxa/list.csv".to_string(),
            delimiter: ',',
            columns: SourceColumns::default(),
        }
    }
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            accepted_no: "accepted_no".to_string(),
            accepted_name: "accepted_name".to_string(),
            accepted_rank: "accepted_rank".to_string(),
            parent_no: "parent_no".to_string(),
            firstapp_max_ma: "firstapp_max_ma".to_string(),
            lastapp_min_ma: "lastapp_min_ma".to_string(),
            is_extant: "is_extant".to_string(),
            difference: "difference".to_string(),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            show_progress: true,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            report_subgenera: true,
        }
    }
}

impl Default for TimescaleConfig {
    fn default() -> Self {
        Self {
            url: "https://macrostrat.org/api/v2/defs/intervals?format=csv&timescale=international".to_string(),
            name_column: "name".to_string(),
            level_column: "int_type".to_string(),
            base_age_column: "b_age".to_string(),
            top_age_column: "t_age".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Convert a configured delimiter into the single byte the csv crate wants
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(PaleotaxError::Config(format!(
            "delimiter '{}' is not a single-byte ASCII character",
            delimiter
        )))
    }
}

impl SourceConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

impl OutputConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PaleotaxError::Config(format!("Failed to parse config: {}", e)))?;
    config.source.delimiter_byte()?;
    config.output.delimiter_byte()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| PaleotaxError::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Resolve the effective configuration.
///
/// An explicit path must exist; otherwise `$PALEOTAX_HOME/config.toml` is
/// used when present, falling back to defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        return load_config(path);
    }

    let default_path = crate::core::paths::config_path();
    if default_path.exists() {
        tracing::debug!("Loading config from {}", default_path.display());
        load_config(default_path)
    } else {
        Ok(Config::default())
    }
}
