//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while reading or writing record files.
///
/// Loading is fail-safe at the store level: any of these turns into an empty
/// cache. Saving reports the first failure and stops.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record file has an invalid or missing header.
    #[error("invalid record header in {path}: {reason}")]
    InvalidHeader {
        /// The record file path.
        path: PathBuf,
        /// Description of the header problem.
        reason: String,
    },

    /// The stored checksum does not match the computed checksum of the payload.
    #[error("checksum mismatch in {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The record file path.
        path: PathBuf,
        /// The expected checksum from the header.
        expected: String,
        /// The actual checksum computed from the payload.
        actual: String,
    },

    /// The record format version does not match the current version.
    #[error("version mismatch in {path}: expected {expected}, got {actual}")]
    VersionMismatch {
        /// The record file path.
        path: PathBuf,
        /// The expected format version.
        expected: u32,
        /// The actual format version found in the file.
        actual: u32,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// A record name cannot be used as a file-name stem.
    #[error("invalid record name '{name}'")]
    InvalidName {
        /// The offending record name.
        name: String,
    },

    /// A save was attempted without a marker record.
    #[error("no marker record; refusing to save an unanchored cache")]
    MissingMarker,
}
