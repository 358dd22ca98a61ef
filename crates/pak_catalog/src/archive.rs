//! The archive reader seam.

use std::path::Path;
use std::time::SystemTime;

use crate::error::ArchiveError;

/// One file-like member of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the entry inside the archive.
    pub path: String,
    /// Modification time recorded for the entry.
    pub modified_at: SystemTime,
}

impl ArchiveEntry {
    /// Creates an entry.
    pub fn new(path: impl Into<String>, modified_at: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified_at,
        }
    }
}

/// Locates and reads entries inside the archive.
///
/// Implementations open the archive per call; no handle is expected to
/// outlive a single method.
pub trait ArchiveExtractor {
    /// Finds the entry whose file name is exactly `name`.
    fn find_by_name(
        &self,
        archive: &Path,
        name: &str,
    ) -> Result<Option<ArchiveEntry>, ArchiveError>;

    /// Lists every entry whose path contains `pattern`.
    fn find_by_prefix_or_substring(
        &self,
        archive: &Path,
        pattern: &str,
    ) -> Result<Vec<ArchiveEntry>, ArchiveError>;

    /// Returns the raw bytes of `entry`.
    fn read_bytes(&self, archive: &Path, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError>;

    /// Returns the archive's modification time, or `None` if it is absent.
    fn archive_modified(&self, archive: &Path) -> Option<SystemTime> {
        let meta = std::fs::metadata(archive).ok()?;
        if !meta.is_file() {
            return None;
        }
        meta.modified().ok()
    }
}

impl<T: ArchiveExtractor + ?Sized> ArchiveExtractor for &T {
    fn find_by_name(
        &self,
        archive: &Path,
        name: &str,
    ) -> Result<Option<ArchiveEntry>, ArchiveError> {
        (**self).find_by_name(archive, name)
    }

    fn find_by_prefix_or_substring(
        &self,
        archive: &Path,
        pattern: &str,
    ) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        (**self).find_by_prefix_or_substring(archive, pattern)
    }

    fn read_bytes(&self, archive: &Path, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError> {
        (**self).read_bytes(archive, entry)
    }

    fn archive_modified(&self, archive: &Path) -> Option<SystemTime> {
        (**self).archive_modified(archive)
    }
}
