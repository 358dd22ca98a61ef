//! Read-only access to the extracted assets.

use std::time::SystemTime;

use once_cell::sync::OnceCell;
use pak_cache::CacheContents;
use pak_config::CatalogConfig;

use crate::archive::ArchiveExtractor;
use crate::decoder::DocumentDecoder;
use crate::orchestrator::{RefreshReport, UpdateOrchestrator};

/// A snapshot of the decoded assets, built by running the orchestrator once.
///
/// Every accessor returns an owned copy; unknown keys yield an empty string.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    contents: CacheContents,
    last_refresh: Option<RefreshReport>,
}

impl AssetCatalog {
    /// Loads the cache, refreshes it from the archive if stale, and keeps
    /// the result.
    pub fn build<E, D>(config: &CatalogConfig, extractor: E, decoder: D) -> Self
    where
        E: ArchiveExtractor,
        D: DocumentDecoder,
    {
        let mut orchestrator = UpdateOrchestrator::new(config, extractor, decoder);
        let last_refresh = orchestrator.orchestrate();
        Self {
            contents: orchestrator.into_contents(),
            last_refresh,
        }
    }

    /// Returns the default profile document, or `""` if none was ever extracted.
    pub fn default_profile(&self) -> String {
        self.contents
            .default_profile
            .as_ref()
            .map(|r| r.content.clone())
            .unwrap_or_default()
    }

    /// Returns the names of all map layouts, sorted.
    pub fn map_file_names(&self) -> Vec<String> {
        self.contents.map_files.keys().cloned().collect()
    }

    /// Returns the map layout document named `name`, or `""`.
    pub fn map_file(&self, name: &str) -> String {
        self.contents
            .map_files
            .get(name)
            .map(|r| r.content.clone())
            .unwrap_or_default()
    }

    /// Returns the codes of all extracted languages, sorted.
    pub fn language_codes(&self) -> Vec<String> {
        self.contents.lang_files.keys().cloned().collect()
    }

    /// Returns the filtered UI strings for `code`, or `""`.
    ///
    /// Codes are stored lower-cased, so lookup is case-insensitive.
    pub fn language_file(&self, code: &str) -> String {
        self.contents
            .lang_files
            .get(&code.to_lowercase())
            .map(|r| r.content.clone())
            .unwrap_or_default()
    }

    /// Returns the archive modification time the catalog reflects.
    pub fn archive_modified(&self) -> Option<SystemTime> {
        self.contents.archive_modified()
    }

    /// Returns the report of the refresh performed while building, if any.
    pub fn last_refresh(&self) -> Option<&RefreshReport> {
        self.last_refresh.as_ref()
    }
}

/// One-time construction guard for an [`AssetCatalog`].
///
/// Suitable for a `static`; the first [`get_or_build`](Self::get_or_build)
/// runs the orchestrator and every later call returns the same catalog.
#[derive(Debug, Default)]
pub struct CatalogCell {
    cell: OnceCell<AssetCatalog>,
}

impl CatalogCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the catalog, building it on first access.
    ///
    /// Arguments are ignored once the catalog exists.
    pub fn get_or_build<E, D>(
        &self,
        config: &CatalogConfig,
        extractor: E,
        decoder: D,
    ) -> &AssetCatalog
    where
        E: ArchiveExtractor,
        D: DocumentDecoder,
    {
        self.cell
            .get_or_init(|| AssetCatalog::build(config, extractor, decoder))
    }

    /// Returns the catalog if it has been built.
    pub fn get(&self) -> Option<&AssetCatalog> {
        self.cell.get()
    }
}
