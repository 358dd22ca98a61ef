//! Persistent record cache for decoded archive assets.
//!
//! Every decoded asset is stored as one gzip-compressed record file in the
//! cache directory. Loading is all-or-nothing: a single unreadable record
//! discards the whole cache so the next run re-extracts from the archive.

#![warn(missing_docs)]

pub mod codec;
pub mod contents;
pub mod error;
pub mod record;
pub mod store;

pub use contents::CacheContents;
pub use error::CacheError;
pub use record::{record_file_name, AssetKind, AssetRecord, MARKER_STEM, RECORD_EXT};
pub use store::CacheStore;
