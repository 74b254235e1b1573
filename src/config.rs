//! TOML-based configuration for trellis.
//!
//! Example configuration (trellis.toml):
//! ```toml
//! [graph]
//! snapshot = "${TRELLIS_GRAPH_SNAPSHOT}"
//!
//! [builder]
//! table_fanout = 8
//! column_fanout = 16
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::FanoutLimits;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Graph source configuration.
    pub graph: GraphSettings,

    /// Builder fan-out configuration.
    pub builder: BuilderSettings,
}

/// Graph source configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Path to the graph snapshot file (supports ${ENV_VAR} expansion).
    pub snapshot: Option<String>,
}

/// Builder fan-out configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// Concurrent table builds per module.
    pub table_fanout: usize,

    /// Concurrent column resolutions per table.
    pub column_fanout: usize,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        let limits = FanoutLimits::default();
        Self {
            table_fanout: limits.tables,
            column_fanout: limits.columns,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parse settings from TOML text.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.builder.table_fanout == 0 || self.builder.column_fanout == 0 {
            return Err(SettingsError::InvalidConfig(
                "fan-out limits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The snapshot path with environment variables expanded.
    pub fn snapshot_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        match &self.graph.snapshot {
            Some(raw) => Ok(Some(PathBuf::from(expand_env_vars(raw)?))),
            None => Ok(None),
        }
    }

    /// Fan-out limits for the module builder.
    pub fn fanout_limits(&self) -> FanoutLimits {
        FanoutLimits {
            tables: self.builder.table_fanout,
            columns: self.builder.column_fanout,
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(SettingsError::InvalidConfig(format!(
                "unterminated variable reference in: {s}"
            )));
        };
        let var_name = &after[..end];
        let value = env::var(var_name)
            .map_err(|_| SettingsError::MissingEnvVar(var_name.to_string()))?;
        result.push_str(&rest[..start]);
        result.push_str(&value);
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}
