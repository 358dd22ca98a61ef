//! Error types for archive access, document decoding and refresh steps.

use std::path::PathBuf;

/// Errors reported by an [`ArchiveExtractor`](crate::ArchiveExtractor).
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The archive could not be read.
    #[error("archive I/O error at {path}: {source}")]
    Io {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The archive's container structure is malformed.
    #[error("malformed archive: {reason}")]
    Format {
        /// Description of the format problem.
        reason: String,
    },

    /// An entry found during the scan is gone by the time it is read.
    #[error("entry '{entry}' vanished from the archive")]
    EntryVanished {
        /// Path of the missing entry.
        entry: String,
    },
}

/// A binary document that could not be turned into text.
#[derive(Debug, thiserror::Error)]
#[error("document decode failed: {diagnostic}")]
pub struct DecodeError {
    /// Decoder-specific description of the failure.
    pub diagnostic: String,
}

impl DecodeError {
    /// Creates a decode error with the given diagnostic.
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }
}

/// Failure of a single refresh step.
///
/// None of these reach catalog readers; each is logged and the affected
/// record keeps its previous value.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The archive file is not present.
    #[error("archive not found at {path}")]
    ArchiveUnavailable {
        /// The configured archive path.
        path: PathBuf,
    },

    /// A well-known entry is absent from the archive.
    #[error("entry '{name}' not found in archive")]
    NotFound {
        /// The entry name that was looked up.
        name: String,
    },

    /// An entry's bytes failed to decode.
    #[error("failed to decode '{entry}': {source}")]
    Decode {
        /// Path of the entry inside the archive.
        entry: String,
        /// The decoder's report.
        source: DecodeError,
    },

    /// Scanning or reading the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
