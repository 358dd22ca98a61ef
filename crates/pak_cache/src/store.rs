//! Loading and saving the full record set to the cache directory.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::codec::{read_record_file, write_record_file};
use crate::contents::CacheContents;
use crate::error::CacheError;
use crate::record::{record_file_name, AssetKind, AssetRecord, RECORD_EXT};

/// Directory-backed store with one compressed file per record.
///
/// Reads are all-or-nothing: a single corrupt record discards the whole
/// cache. Writes are not atomic: a failure stops the pass and leaves files
/// already written in place.
pub struct CacheStore {
    /// Directory holding the record files.
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a store rooted at `cache_dir`. Nothing is touched on disk.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path a record of `kind` named `name` is stored at.
    pub fn record_path(&self, kind: AssetKind, name: &str) -> PathBuf {
        self.cache_dir.join(record_file_name(kind, name))
    }

    /// Loads every record, or nothing.
    ///
    /// A missing cache directory yields empty contents. Any read or decode
    /// error is logged and also yields empty contents, which forces a full
    /// re-extraction on the next staleness check.
    pub fn load(&self) -> CacheContents {
        match self.try_load() {
            Ok(contents) => {
                debug!(
                    cache_dir = %self.cache_dir.display(),
                    records = contents.len(),
                    "loaded record cache"
                );
                contents
            }
            Err(err) => {
                error!(
                    cache_dir = %self.cache_dir.display(),
                    error = %err,
                    "record cache unreadable, starting empty"
                );
                CacheContents::default()
            }
        }
    }

    /// Loads every record, stopping at the first failure.
    ///
    /// If more than one marker is found, the newest one wins.
    pub fn try_load(&self) -> Result<CacheContents, CacheError> {
        let mut contents = CacheContents::default();
        if !self.cache_dir.is_dir() {
            return Ok(contents);
        }

        for path in self.record_files()? {
            let record = read_record_file(&path)?;
            if record.kind == AssetKind::Marker {
                if let Some(kept) = &contents.marker {
                    warn!(path = %path.display(), "extra marker record in cache");
                    if kept.modified_at >= record.modified_at {
                        continue;
                    }
                }
            }
            contents.insert(record);
        }
        Ok(contents)
    }

    /// Persists every record in `contents`, returning the number of files written.
    ///
    /// Refuses to save contents without a marker. The first failure is
    /// logged and returned; remaining records are not written.
    pub fn save(&self, contents: &CacheContents) -> Result<usize, CacheError> {
        let result = self.try_save(contents);
        if let Err(err) = &result {
            error!(
                cache_dir = %self.cache_dir.display(),
                error = %err,
                "record cache save abandoned"
            );
        }
        result
    }

    fn try_save(&self, contents: &CacheContents) -> Result<usize, CacheError> {
        if contents.marker.is_none() {
            return Err(CacheError::MissingMarker);
        }
        std::fs::create_dir_all(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })?;

        let mut written = 0;
        for record in contents.records() {
            self.write_record(record)?;
            written += 1;
        }
        debug!(cache_dir = %self.cache_dir.display(), written, "saved record cache");
        Ok(written)
    }

    /// Writes a single record file and returns its path.
    pub fn write_record(&self, record: &AssetRecord) -> Result<PathBuf, CacheError> {
        validate_name(&record.name)?;
        let path = self.record_path(record.kind, &record.name);
        write_record_file(&path, record)?;
        Ok(path)
    }

    /// Lists record files in the cache directory, sorted by path.
    fn record_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        let entries = std::fs::read_dir(&self.cache_dir).map_err(|e| CacheError::Io {
            path: self.cache_dir.clone(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::Io {
                path: self.cache_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXT) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// Rejects names that cannot be used as a single file-name stem.
fn validate_name(name: &str) -> Result<(), CacheError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(CacheError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
