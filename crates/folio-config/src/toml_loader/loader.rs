//! Reading and deserializing config files.

use std::path::Path;

use folio_common::ConfigError;
use tracing::{debug, info};

use crate::schema::FolioConfig;

use super::paths::{create_default_config, default_config_path, io_error};

/// Parse a config file. Missing keys take their defaults; range checks
/// are left to [`crate::validation::validate`].
pub fn load_from_path(path: &Path) -> Result<FolioConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;
    let config = toml::from_str::<FolioConfig>(&text).map_err(|e| {
        ConfigError::ParseError(format!("invalid TOML in {}: {e}", path.display()))
    })?;

    debug!(model = %config.chat.model, site = %config.site.site_url, "parsed config");
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load the platform default file (see [`default_config_path`]). On first
/// run the commented template is written and defaults are returned.
pub fn load_default() -> Result<FolioConfig, ConfigError> {
    let path = default_config_path()?;
    if path.is_file() {
        return load_from_path(&path);
    }

    info!("no config at {}, writing template", path.display());
    create_default_config(&path)?;
    Ok(FolioConfig::default())
}
