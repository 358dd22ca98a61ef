//! Incremental extraction of decoded assets from the game archive.
//!
//! The [`UpdateOrchestrator`] loads the record cache, compares the archive's
//! modification time against the cached marker, and only when the archive is
//! newer re-extracts the default profile, the map layouts and the UI strings
//! of every supported language. The archive reader and the binary document
//! decoder are supplied by the caller through [`ArchiveExtractor`] and
//! [`DocumentDecoder`].
//!
//! Consumers read through an [`AssetCatalog`], built once per [`CatalogCell`]:
//!
//! ```ignore
//! static CATALOG: CatalogCell = CatalogCell::new();
//!
//! let config = pak_config::load_config(&config_dir)?;
//! let catalog = CATALOG.get_or_build(&config, P4kReader::new(), CryXmlDecoder);
//! for name in catalog.map_file_names() {
//!     println!("{name}: {} bytes", catalog.map_file(&name).len());
//! }
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod catalog;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod strings;

pub use archive::{ArchiveEntry, ArchiveExtractor};
pub use catalog::{AssetCatalog, CatalogCell};
pub use decoder::DocumentDecoder;
pub use error::{ArchiveError, CatalogError, DecodeError};
pub use logging::init_logging;
pub use orchestrator::{staleness, RefreshReport, Staleness, UpdateOrchestrator};
