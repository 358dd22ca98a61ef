//! The in-memory catalog: one owned table per asset kind.

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::record::{AssetKind, AssetRecord};

/// All cached records, grouped by kind.
///
/// Inserts replace by key and never prune, so a record whose archive entry
/// has disappeared stays until the cache directory is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheContents {
    /// Archive timestamp sentinel. `None` until the first refresh.
    pub marker: Option<AssetRecord>,
    /// The default profile, if one has ever been decoded.
    pub default_profile: Option<AssetRecord>,
    /// Map layouts keyed by entry file name.
    pub map_files: BTreeMap<String, AssetRecord>,
    /// Language strings keyed by lower-cased language code.
    pub lang_files: BTreeMap<String, AssetRecord>,
}

impl CacheContents {
    /// Creates empty contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `record` in the table for its kind, replacing any record with
    /// the same key. Returns the replaced record.
    pub fn insert(&mut self, record: AssetRecord) -> Option<AssetRecord> {
        match record.kind {
            AssetKind::Marker => self.marker.replace(record),
            AssetKind::DefaultProfile => self.default_profile.replace(record),
            AssetKind::MapLayout => self.map_files.insert(record.name.clone(), record),
            AssetKind::LanguageStrings => self.lang_files.insert(record.name.clone(), record),
        }
    }

    /// Returns the archive timestamp recorded by the marker.
    pub fn archive_modified(&self) -> Option<SystemTime> {
        self.marker.as_ref().map(|m| m.modified_at)
    }

    /// Iterates records in save order: marker, default profile, map layouts,
    /// language strings.
    pub fn records(&self) -> impl Iterator<Item = &AssetRecord> {
        self.marker
            .iter()
            .chain(self.default_profile.iter())
            .chain(self.map_files.values())
            .chain(self.lang_files.values())
    }

    /// Returns the total number of records.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    /// Returns `true` if no record of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.marker.is_none()
            && self.default_profile.is_none()
            && self.map_files.is_empty()
            && self.lang_files.is_empty()
    }
}
