//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CatalogConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "pakcache.toml";

/// Loads and validates a `pakcache.toml` configuration from a directory.
///
/// Reads `<dir>/pakcache.toml`, parses it, and validates required fields.
pub fn load_config(dir: &Path) -> Result<CatalogConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `pakcache.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<CatalogConfig, ConfigError> {
    let config: CatalogConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and extraction settings are usable.
pub fn validate_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.archive.path.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("archive.path".to_string()));
    }
    let ex = &config.extraction;
    for (field, value) in [
        ("extraction.default_profile", &ex.default_profile),
        ("extraction.map_layout_pattern", &ex.map_layout_pattern),
        ("extraction.language_pattern", &ex.language_pattern),
        ("extraction.ui_key_prefix", &ex.ui_key_prefix),
    ] {
        if value.is_empty() {
            return Err(ConfigError::ValidationError(format!("{field} is empty")));
        }
    }
    if ex.languages.iter().any(|l| l.is_empty()) {
        return Err(ConfigError::ValidationError(
            "extraction.languages contains an empty entry".to_string(),
        ));
    }
    Ok(())
}
