//! Configuration types deserialized from `pakcache.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Archive entry name of the baseline configuration document.
pub const DEFAULT_PROFILE_NAME: &str = "defaultProfile.xml";

/// Path token shared by every map layout entry.
pub const DEFAULT_MAP_LAYOUT_PATTERN: &str = r"Data\Libs\Config\Mappings\layout_";

/// Path token matching every localization file.
pub const DEFAULT_LANGUAGE_PATTERN: &str = r"\global.ini";

/// Tag prefix of the UI strings kept from each localization file.
pub const DEFAULT_UI_KEY_PREFIX: &str = "ui_C";

/// Localization directory names accepted when no list is configured.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "english",
    "chinese_(simplified)",
    "chinese_(traditional)",
    "french_(france)",
    "german_(germany)",
    "italian_(italy)",
    "japanese_(japan)",
    "korean_(south_korea)",
    "polish_(poland)",
    "portuguese_(brazil)",
    "spanish_(latin_america)",
    "spanish_(spain)",
];

/// The top-level configuration parsed from `pakcache.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Location of the source archive.
    #[serde(default)]
    pub archive: ArchiveConfig,
    /// Location of the local record cache.
    #[serde(default)]
    pub cache: CacheConfig,
    /// What to pull out of the archive and how to filter it.
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl CatalogConfig {
    /// Builds a configuration in code with default extraction settings.
    pub fn new(archive_path: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive: ArchiveConfig {
                path: archive_path.into(),
            },
            cache: CacheConfig {
                dir: Some(cache_dir.into()),
            },
            extraction: ExtractionConfig::default(),
        }
    }

    /// Returns the cache directory, falling back to the per-user default.
    pub fn cache_dir(&self) -> PathBuf {
        crate::resolve::resolve_cache_dir(&self.cache)
    }
}

/// Where the source archive lives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveConfig {
    /// Filesystem path of the archive. The file itself may be absent.
    #[serde(default)]
    pub path: PathBuf,
}

/// Where decoded records are persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// Explicit cache directory. Defaults to a per-user cache location.
    pub dir: Option<PathBuf>,
}

/// Extraction settings: entry names, path patterns and string filtering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Exact entry name of the default profile.
    pub default_profile: String,
    /// Token contained in the path of every map layout entry.
    pub map_layout_pattern: String,
    /// Token contained in the path of every localization file.
    pub language_pattern: String,
    /// Tag prefix of the UI strings to keep.
    pub ui_key_prefix: String,
    /// Closed set of supported language directory names.
    ///
    /// Accepts either a single string or a list of strings.
    #[serde(deserialize_with = "deserialize_string_or_vec")]
    pub languages: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_profile: DEFAULT_PROFILE_NAME.to_string(),
            map_layout_pattern: DEFAULT_MAP_LAYOUT_PATTERN.to_string(),
            language_pattern: DEFAULT_LANGUAGE_PATTERN.to_string(),
            ui_key_prefix: DEFAULT_UI_KEY_PREFIX.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractionConfig {
    /// Returns `true` if `code` names a supported language directory.
    pub fn supports_language(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l == code)
    }
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows `languages = "english"` as well as `languages = ["english", "german_(germany)"]`.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
