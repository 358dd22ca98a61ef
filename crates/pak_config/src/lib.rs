//! Parsing and validation of `pakcache.toml` configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`CatalogConfig`] naming the source archive, the per-user cache directory,
//! and the extraction settings (well-known entry names, path patterns, the
//! supported language set and the UI-string key prefix).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, validate_config, CONFIG_FILE};
pub use resolve::resolve_cache_dir;
pub use types::*;
