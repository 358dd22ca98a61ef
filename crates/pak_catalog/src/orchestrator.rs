//! Staleness detection and the archive refresh pass.
//!
//! The orchestrator owns the in-memory [`CacheContents`]. A refresh upserts
//! into it step by step, so a failing step only leaves its own record at the
//! previous value, and the result is persisted in one save at the end.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use pak_cache::{AssetKind, AssetRecord, CacheContents, CacheStore};
use pak_common::{file_name, parent_dir};
use pak_config::{CatalogConfig, ExtractionConfig};
use tracing::{debug, info, warn};

use crate::archive::{ArchiveEntry, ArchiveExtractor};
use crate::decoder::DocumentDecoder;
use crate::error::CatalogError;
use crate::strings::{filter_ui_strings, language_code};

/// Whether the cached records still reflect the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// No refresh needed.
    Fresh,
    /// The archive must be re-extracted.
    Stale,
}

/// Decides staleness from the cached marker and the archive's current
/// modification time (`None` when the archive is absent).
///
/// Without a marker the cache is always stale. With a marker and no archive
/// the cache stands. Otherwise the archive must be strictly newer.
pub fn staleness(marker: Option<&AssetRecord>, archive_modified: Option<SystemTime>) -> Staleness {
    match (marker, archive_modified) {
        (None, _) => Staleness::Stale,
        (Some(_), None) => Staleness::Fresh,
        (Some(marker), Some(current)) if current > marker.modified_at => Staleness::Stale,
        (Some(_), Some(_)) => Staleness::Fresh,
    }
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    /// Archive modification time stored in the marker.
    pub archive_modified: SystemTime,
    /// Whether the default profile was replaced.
    pub default_profile_updated: bool,
    /// Map layouts decoded and upserted.
    pub maps_updated: usize,
    /// Map layouts skipped because reading or decoding failed.
    pub maps_failed: usize,
    /// Language files filtered and upserted.
    pub languages_updated: usize,
    /// Language files skipped because their code is not supported.
    pub languages_skipped: usize,
    /// Language files skipped because reading failed.
    pub languages_failed: usize,
    /// Number of record files written, or `None` if the save failed.
    pub persisted: Option<usize>,
}

impl RefreshReport {
    fn new(archive_modified: SystemTime) -> Self {
        Self {
            archive_modified,
            default_profile_updated: false,
            maps_updated: 0,
            maps_failed: 0,
            languages_updated: 0,
            languages_skipped: 0,
            languages_failed: 0,
            persisted: None,
        }
    }
}

/// Drives the load → staleness check → refresh → save cycle.
pub struct UpdateOrchestrator<E, D> {
    archive_path: PathBuf,
    extraction: ExtractionConfig,
    store: CacheStore,
    extractor: E,
    decoder: D,
    contents: CacheContents,
}

impl<E: ArchiveExtractor, D: DocumentDecoder> UpdateOrchestrator<E, D> {
    /// Creates an orchestrator with empty contents. Nothing is read yet.
    pub fn new(config: &CatalogConfig, extractor: E, decoder: D) -> Self {
        Self {
            archive_path: config.archive.path.clone(),
            extraction: config.extraction.clone(),
            store: CacheStore::new(&config.cache_dir()),
            extractor,
            decoder,
            contents: CacheContents::default(),
        }
    }

    /// Returns the configured archive path.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Returns the current in-memory contents.
    pub fn contents(&self) -> &CacheContents {
        &self.contents
    }

    /// Consumes the orchestrator, returning its contents.
    pub fn into_contents(self) -> CacheContents {
        self.contents
    }

    /// Replaces the in-memory contents with whatever the cache holds.
    pub fn load(&mut self) {
        self.contents = self.store.load();
    }

    /// Returns the archive's current modification time, `None` if absent.
    pub fn archive_modified(&self) -> Option<SystemTime> {
        self.extractor.archive_modified(&self.archive_path)
    }

    /// Compares the loaded marker with the archive.
    pub fn staleness(&self) -> Staleness {
        staleness(self.contents.marker.as_ref(), self.archive_modified())
    }

    /// Loads the cache and refreshes it if the archive is newer.
    ///
    /// Returns the refresh report, or `None` when no refresh ran.
    pub fn orchestrate(&mut self) -> Option<RefreshReport> {
        self.load();
        let current = self.archive_modified();
        match (staleness(self.contents.marker.as_ref(), current), current) {
            (Staleness::Stale, Some(modified)) => Some(self.refresh_from(modified)),
            (Staleness::Stale, None) => {
                info!(
                    archive = %self.archive_path.display(),
                    "archive not found, nothing to extract"
                );
                None
            }
            (Staleness::Fresh, _) => {
                debug!(records = self.contents.len(), "record cache is fresh");
                None
            }
        }
    }

    /// Re-extracts every asset category from the archive and saves the result.
    pub fn refresh_all(&mut self) -> Result<RefreshReport, CatalogError> {
        let modified = self
            .archive_modified()
            .ok_or_else(|| CatalogError::ArchiveUnavailable {
                path: self.archive_path.clone(),
            })?;
        Ok(self.refresh_from(modified))
    }

    fn refresh_from(&mut self, archive_modified: SystemTime) -> RefreshReport {
        info!(archive = %self.archive_path.display(), "refreshing assets from archive");
        let mut report = RefreshReport::new(archive_modified);

        // The marker governs the next staleness check even if steps below fail.
        self.contents
            .insert(AssetRecord::marker(&self.archive_path, archive_modified));

        match self.extract_default_profile() {
            Ok(record) => {
                self.contents.insert(record);
                report.default_profile_updated = true;
            }
            Err(err) => warn!(error = %err, "default profile kept from previous refresh"),
        }

        self.refresh_map_layouts(&mut report);
        self.refresh_languages(&mut report);

        report.persisted = self.store.save(&self.contents).ok();

        info!(
            default_profile = report.default_profile_updated,
            maps = report.maps_updated,
            maps_failed = report.maps_failed,
            languages = report.languages_updated,
            languages_skipped = report.languages_skipped,
            persisted = ?report.persisted,
            "archive refresh complete"
        );
        report
    }

    fn extract_default_profile(&self) -> Result<AssetRecord, CatalogError> {
        let entry = self.find_named(&self.extraction.default_profile)?;
        let content = self.decode_entry(&entry)?;
        Ok(AssetRecord::new(
            AssetKind::DefaultProfile,
            file_name(&entry.path),
            parent_dir(&entry.path),
            entry.modified_at,
            content,
        ))
    }

    fn refresh_map_layouts(&mut self, report: &mut RefreshReport) {
        let entries = match self
            .extractor
            .find_by_prefix_or_substring(&self.archive_path, &self.extraction.map_layout_pattern)
        {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "map layout scan failed");
                return;
            }
        };

        for entry in &entries {
            match self.decode_entry(entry) {
                Ok(content) => {
                    let record = AssetRecord::new(
                        AssetKind::MapLayout,
                        file_name(&entry.path),
                        parent_dir(&entry.path),
                        entry.modified_at,
                        content,
                    );
                    debug!(name = %record.name, "map layout extracted");
                    self.contents.insert(record);
                    report.maps_updated += 1;
                }
                Err(err) => {
                    warn!(entry = %entry.path, error = %err, "skipping map layout");
                    report.maps_failed += 1;
                }
            }
        }
    }

    fn refresh_languages(&mut self, report: &mut RefreshReport) {
        let entries = match self
            .extractor
            .find_by_prefix_or_substring(&self.archive_path, &self.extraction.language_pattern)
        {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "language file scan failed");
                return;
            }
        };

        for entry in &entries {
            let Some(code) =
                language_code(&entry.path).filter(|c| self.extraction.supports_language(c))
            else {
                debug!(entry = %entry.path, "unsupported language skipped");
                report.languages_skipped += 1;
                continue;
            };

            let bytes = match self.extractor.read_bytes(&self.archive_path, entry) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(entry = %entry.path, error = %err, "skipping language file");
                    report.languages_failed += 1;
                    continue;
                }
            };
            let content = filter_ui_strings(
                &String::from_utf8_lossy(&bytes),
                &self.extraction.ui_key_prefix,
            );

            let record = AssetRecord::new(
                AssetKind::LanguageStrings,
                code.to_lowercase(),
                parent_dir(&entry.path),
                entry.modified_at,
                content,
            );
            debug!(name = %record.name, "language strings extracted");
            self.contents.insert(record);
            report.languages_updated += 1;
        }
    }

    /// Decodes one named entry straight from the archive, bypassing the cache.
    ///
    /// Returns `None` if the archive is absent, the entry is missing, or
    /// reading or decoding fails.
    pub fn extract_document(&self, name: &str) -> Option<String> {
        let result = if self.archive_modified().is_none() {
            Err(CatalogError::ArchiveUnavailable {
                path: self.archive_path.clone(),
            })
        } else {
            self.find_named(name)
                .and_then(|entry| self.decode_entry(&entry))
        };
        match result {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(document = name, error = %err, "document extraction failed");
                None
            }
        }
    }

    fn find_named(&self, name: &str) -> Result<ArchiveEntry, CatalogError> {
        self.extractor
            .find_by_name(&self.archive_path, name)?
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }

    fn decode_entry(&self, entry: &ArchiveEntry) -> Result<String, CatalogError> {
        let bytes = self.extractor.read_bytes(&self.archive_path, entry)?;
        self.decoder
            .decode(&bytes)
            .map_err(|source| CatalogError::Decode {
                entry: entry.path.clone(),
                source,
            })
    }
}
