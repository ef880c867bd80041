//! Folio configuration system.
//!
//! TOML-based configuration for the chat assistant, site metadata, content
//! overrides and logging. All sections use defaults so partial configs work
//! out of the box.
//!
//! ```rust,no_run
//! let config = folio_config::load_config().expect("failed to load config");
//! println!("model: {}", config.chat.model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ChatConfig, ContentConfig, FolioConfig, LogLevel, LoggingConfig, SiteConfig};

use std::path::Path;

use folio_common::ConfigError;

/// Load config from the platform default path, creating a commented default
/// file on first run, and validate the result.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path. Unlike [`load_config`],
/// a missing file is an error.
pub fn load_config_from(path: &Path) -> Result<FolioConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FolioConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
