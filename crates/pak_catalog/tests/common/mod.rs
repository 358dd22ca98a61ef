//! In-memory archive and decoder used by the lifecycle tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pak_catalog::{ArchiveEntry, ArchiveError, ArchiveExtractor, DecodeError, DocumentDecoder};
use pak_common::file_name;
use pak_config::CatalogConfig;
use tempfile::TempDir;

/// Magic prefix the fake decoder expects in front of the document text.
const DOC_MAGIC: &[u8] = b"CryXmlB\0";

pub const PROFILE_PATH: &str = r"Data\Libs\Config\defaultProfile.xml";
pub const MAP_DIR: &str = r"Data\Libs\Config\Mappings";
pub const LOC_DIR: &str = r"Data\Localization";

pub fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

/// Wraps `text` the way the fake decoder expects.
pub fn document(text: &str) -> Vec<u8> {
    let mut bytes = DOC_MAGIC.to_vec();
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

pub fn map_path(name: &str) -> String {
    format!(r"{MAP_DIR}\{name}")
}

pub fn lang_path(dir: &str) -> String {
    format!(r"{LOC_DIR}\{dir}\global.ini")
}

/// A scratch workspace holding the cache directory and a config pointing at it.
pub struct Workspace {
    pub dir: TempDir,
    pub config: CatalogConfig,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(dir.path().join("Data.p4k"), dir.path().join("cache"));
        Self { dir, config }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.config.cache_dir()
    }
}

/// Archive held in memory. Counts reads so tests can tell whether a refresh ran.
pub struct FakeArchive {
    modified: Cell<Option<SystemTime>>,
    entries: RefCell<Vec<(ArchiveEntry, Vec<u8>)>>,
    reads: Cell<usize>,
    fail_scans: Cell<bool>,
    unreadable: RefCell<Vec<String>>,
}

impl FakeArchive {
    pub fn new(modified: Option<SystemTime>) -> Self {
        Self {
            modified: Cell::new(modified),
            entries: RefCell::new(Vec::new()),
            reads: Cell::new(0),
            fail_scans: Cell::new(false),
            unreadable: RefCell::new(Vec::new()),
        }
    }

    /// An archive with a profile, two map layouts and three language files,
    /// one of them unsupported.
    pub fn standard(modified: SystemTime) -> Self {
        let archive = Self::new(Some(modified));
        archive.put(PROFILE_PATH, document("<profile version=\"1\"/>"));
        archive.put(&map_path("layout_gamepad.xml"), document("<map device=\"gamepad\"/>"));
        archive.put(&map_path("layout_joystick.xml"), document("<map device=\"joystick\"/>"));
        archive.put(
            &lang_path("english"),
            b"\xef\xbb\xbfui_CFire=Fire\r\nother=Ignored\r\nui_CJump=Jump\r\n".to_vec(),
        );
        archive.put(
            &lang_path("german_(germany)"),
            "ui_CFire=Feuer\nmission_Text=Nein\n".as_bytes().to_vec(),
        );
        archive.put(&lang_path("klingon"), b"ui_CFire=baH\n".to_vec());
        archive
    }

    /// Adds or replaces an entry, stamped with the archive's current time.
    pub fn put(&self, path: &str, bytes: Vec<u8>) {
        let stamp = self.modified.get().unwrap_or(UNIX_EPOCH);
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(e, _)| e.path != path);
        entries.push((ArchiveEntry::new(path, stamp), bytes));
    }

    pub fn remove(&self, path: &str) {
        self.entries.borrow_mut().retain(|(e, _)| e.path != path);
    }

    pub fn set_modified(&self, modified: Option<SystemTime>) {
        self.modified.set(modified);
    }

    pub fn fail_scans(&self) {
        self.fail_scans.set(true);
    }

    /// Makes every read of `path` fail while the entry stays listed.
    pub fn fail_reads_of(&self, path: &str) {
        self.unreadable.borrow_mut().push(path.to_string());
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl ArchiveExtractor for FakeArchive {
    fn find_by_name(&self, _: &Path, name: &str) -> Result<Option<ArchiveEntry>, ArchiveError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .map(|(e, _)| e)
            .find(|e| file_name(&e.path) == name)
            .cloned())
    }

    fn find_by_prefix_or_substring(
        &self,
        _: &Path,
        pattern: &str,
    ) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        if self.fail_scans.get() {
            return Err(ArchiveError::Format {
                reason: "central directory truncated".to_string(),
            });
        }
        Ok(self
            .entries
            .borrow()
            .iter()
            .map(|(e, _)| e)
            .filter(|e| e.path.contains(pattern))
            .cloned()
            .collect())
    }

    fn read_bytes(&self, _: &Path, entry: &ArchiveEntry) -> Result<Vec<u8>, ArchiveError> {
        self.reads.set(self.reads.get() + 1);
        if self.unreadable.borrow().contains(&entry.path) {
            return Err(ArchiveError::Io {
                path: PathBuf::from(&entry.path),
                source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "inflate failed"),
            });
        }
        self.entries
            .borrow()
            .iter()
            .find(|(e, _)| e.path == entry.path)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| ArchiveError::EntryVanished {
                entry: entry.path.clone(),
            })
    }

    fn archive_modified(&self, _: &Path) -> Option<SystemTime> {
        self.modified.get()
    }
}

/// Accepts only byte strings produced by [`document`].
pub struct FakeDecoder;

impl DocumentDecoder for FakeDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let body = bytes
            .strip_prefix(DOC_MAGIC)
            .ok_or_else(|| DecodeError::new("missing CryXmlB signature"))?;
        String::from_utf8(body.to_vec()).map_err(|e| DecodeError::new(e.to_string()))
    }
}
