//! Cache directory resolution.

use crate::types::CacheConfig;
use std::path::PathBuf;

/// Directory name used under the platform cache location.
pub const CACHE_DIR_NAME: &str = "pakcache";

/// Resolves the directory that holds the record files.
///
/// An explicit `cache.dir` wins. Otherwise the per-user cache location from
/// [`dirs::cache_dir`] is used, and if the platform has none, `./.pakcache`.
pub fn resolve_cache_dir(cache: &CacheConfig) -> PathBuf {
    if let Some(dir) = &cache.dir {
        return dir.clone();
    }
    match dirs::cache_dir() {
        Some(base) => base.join(CACHE_DIR_NAME),
        None => PathBuf::from(format!(".{CACHE_DIR_NAME}")),
    }
}
