//! Configuration module.
//!
//! Handles the `semlayer.toml` settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, JoinSettings, Settings, SettingsError, SqlSettings, ValidationSettings,
};
