//! The persisted unit: one decoded asset plus its provenance.

use std::fmt;
use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// File extension of every record file in the cache directory.
pub const RECORD_EXT: &str = "asset";

/// File-name stem of the marker record, independent of the archive name.
pub const MARKER_STEM: &str = "marker";

/// The category a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Sentinel holding the archive's last-seen modification time.
    Marker,
    /// The baseline configuration document.
    DefaultProfile,
    /// A per-device control-binding document.
    MapLayout,
    /// Filtered UI strings for one language.
    LanguageStrings,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetKind::Marker => "marker",
            AssetKind::DefaultProfile => "default profile",
            AssetKind::MapLayout => "map layout",
            AssetKind::LanguageStrings => "language strings",
        };
        f.write_str(s)
    }
}

impl AssetKind {
    /// Prefix separating this kind's record files from every other kind's.
    pub fn file_prefix(self) -> &'static str {
        match self {
            AssetKind::Marker => MARKER_STEM,
            AssetKind::DefaultProfile => "profile",
            AssetKind::MapLayout => "map",
            AssetKind::LanguageStrings => "lang",
        }
    }
}

/// Returns the file name a record of `kind` named `name` is stored under.
///
/// The marker always maps to `marker.asset`, so switching archives replaces
/// it instead of leaving a second marker behind. Other kinds are prefixed
/// with their kind, so equal names in different kinds never collide.
pub fn record_file_name(kind: AssetKind, name: &str) -> String {
    match kind {
        AssetKind::Marker => format!("{MARKER_STEM}.{RECORD_EXT}"),
        _ => format!("{}-{name}.{RECORD_EXT}", kind.file_prefix()),
    }
}

/// One decoded asset with its provenance and timestamp.
///
/// `name` is unique within `kind`; together they determine the record's file
/// name (see [`record_file_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Which collection the record belongs to.
    pub kind: AssetKind,
    /// Cache key within `kind`.
    pub name: String,
    /// Directory of the source entry inside the archive.
    pub source_path: String,
    /// Modification time of the source entry.
    pub modified_at: SystemTime,
    /// Decoded text.
    pub content: String,
}

impl AssetRecord {
    /// Creates a record.
    pub fn new(
        kind: AssetKind,
        name: impl Into<String>,
        source_path: impl Into<String>,
        modified_at: SystemTime,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            source_path: source_path.into(),
            modified_at,
            content: content.into(),
        }
    }

    /// Creates the marker record for an archive seen at `modified_at`.
    ///
    /// The marker is named after the archive file and carries no content.
    pub fn marker(archive_path: &Path, modified_at: SystemTime) -> Self {
        let name = archive_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        let source_path = archive_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Self::new(AssetKind::Marker, name, source_path, modified_at, "")
    }

    /// Returns the file name this record is stored under.
    pub fn file_name(&self) -> String {
        record_file_name(self.kind, &self.name)
    }
}
