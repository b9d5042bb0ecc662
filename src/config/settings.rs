//! TOML-based configuration.
//!
//! Supports a config file (semlayer.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [sql]
//! dialect = "${WAREHOUSE_DIALECT}"
//!
//! [joins]
//! max_hops = 2
//!
//! [validation]
//! warnings_as_errors = false
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::semantic::{JoinHops, MAX_JOIN_HOPS};
use crate::sql::render::{Dialect, SqlQueryPlanRenderer};
use crate::validation::ModelValidator;

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

    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// SQL rendering.
    pub sql: SqlSettings,

    /// Join path resolution.
    pub joins: JoinSettings,

    /// Model validation.
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SqlSettings {
    /// Target dialect name (supports ${ENV_VAR} expansion).
    pub dialect: String,
}

impl Default for SqlSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::Default.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JoinSettings {
    /// Maximum join path length. Values above the supported maximum are clamped.
    pub max_hops: u32,
}

impl Default for JoinSettings {
    fn default() -> Self {
        Self { max_hops: 1 }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Treat validation warnings as blocking.
    pub warnings_as_errors: bool,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text and check them.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.dialect()?;
        settings.join_hops()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SEMLAYER_CONFIG`
    /// 2. `./semlayer.toml`
    /// 3. `~/.config/semlayer/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SEMLAYER_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("semlayer.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("semlayer").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// The configured dialect, with environment variables expanded.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        let name = expand_env_vars(&self.sql.dialect)?;
        name.parse::<Dialect>()
            .map_err(|_| SettingsError::UnknownDialect(name))
    }

    /// Hop budget for join path resolution.
    pub fn join_hops(&self) -> Result<JoinHops, SettingsError> {
        match self.joins.max_hops {
            0 => Err(SettingsError::InvalidConfig(
                "joins.max_hops must be at least 1".to_string(),
            )),
            1 => Ok(JoinHops::Single),
            hops => {
                if hops as usize > MAX_JOIN_HOPS {
                    warn!(
                        requested = hops,
                        max = MAX_JOIN_HOPS,
                        "joins.max_hops exceeds the supported maximum, clamping"
                    );
                }
                Ok(JoinHops::Multi)
            }
        }
    }

    /// Plan renderer for the configured dialect.
    pub fn plan_renderer(&self) -> Result<SqlQueryPlanRenderer, SettingsError> {
        Ok(SqlQueryPlanRenderer::new(self.dialect()?))
    }

    /// Validator with every rule, honoring `warnings_as_errors`.
    pub fn model_validator(&self) -> ModelValidator {
        ModelValidator::default().with_warnings_as_errors(self.validation.warnings_as_errors)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR ends at the first non-alphanumeric/underscore
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
