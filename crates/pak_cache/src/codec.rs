//! On-disk layout of a single record file.
//!
//! A record file is a gzip stream. Its decompressed body is a 4-byte
//! little-endian header length, a bincode-encoded [`RecordHeader`], and the
//! bincode-encoded [`AssetRecord`] payload. The header carries magic bytes,
//! the format version and a checksum of the payload bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use pak_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::record::AssetRecord;

/// Magic bytes identifying a pakcache record.
const RECORD_MAGIC: [u8; 4] = *b"PAKR";

/// Current record format version. Increment on breaking changes to the
/// header or payload layout.
pub const RECORD_FORMAT_VERSION: u32 = 1;

/// Header prepended to every record payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Magic bytes: must be `b"PAKR"`.
    pub magic: [u8; 4],
    /// Record format version.
    pub format_version: u32,
    /// Content hash of the payload bytes.
    pub checksum: ContentHash,
}

/// Encodes a record into an uncompressed frame (header length, header, payload).
pub fn encode_record(record: &AssetRecord) -> Result<Vec<u8>, CacheError> {
    let payload = bincode::serde::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header = RecordHeader {
        magic: RECORD_MAGIC,
        format_version: RECORD_FORMAT_VERSION,
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut frame = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    frame.extend_from_slice(&header_len.to_le_bytes());
    frame.extend_from_slice(&header_bytes);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decodes an uncompressed frame, validating magic, version and checksum.
///
/// `path` is only used for error reporting.
pub fn decode_record(path: &Path, raw: &[u8]) -> Result<AssetRecord, CacheError> {
    let invalid = |reason: &str| CacheError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if raw.len() < 4 {
        return Err(invalid("truncated header length"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[..4]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    if raw.len() - 4 < header_len {
        return Err(invalid("truncated header"));
    }

    let (header, _): (RecordHeader, usize) =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .map_err(|e| invalid(&e.to_string()))?;

    if header.magic != RECORD_MAGIC {
        return Err(invalid("bad magic bytes"));
    }
    if header.format_version != RECORD_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: RECORD_FORMAT_VERSION,
            actual: header.format_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let actual = ContentHash::from_bytes(payload);
    if actual != header.checksum {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }

    let (record, _): (AssetRecord, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard()).map_err(|e| {
            CacheError::Serialization {
                reason: e.to_string(),
            }
        })?;
    Ok(record)
}

/// Writes `record` to `path` through a gzip stream, replacing any existing file.
pub fn write_record_file(path: &Path, record: &AssetRecord) -> Result<(), CacheError> {
    let frame = encode_record(record)?;
    let io_err = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    encoder.write_all(&frame).map_err(io_err)?;
    encoder.finish().and_then(|mut w| w.flush()).map_err(io_err)
}

/// Reads and validates the record stored at `path`.
pub fn read_record_file(path: &Path) -> Result<AssetRecord, CacheError> {
    let file = File::open(path).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut raw = Vec::new();
    GzDecoder::new(BufReader::new(file))
        .read_to_end(&mut raw)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
                CacheError::InvalidHeader {
                    path: path.to_path_buf(),
                    reason: format!("corrupt gzip stream: {e}"),
                }
            }
            _ => CacheError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

    decode_record(path, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AssetKind;
    use std::time::{Duration, UNIX_EPOCH};

    fn sample() -> AssetRecord {
        AssetRecord::new(
            AssetKind::MapLayout,
            "layout_gamepad.xml",
            r"Data\Libs\Config\Mappings",
            UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789),
            "<ActionMaps version=\"1\"/>",
        )
    }

    fn frame(header: &RecordHeader, payload: &[u8]) -> Vec<u8> {
        let header_bytes =
            bincode::serde::encode_to_vec(header, bincode::config::standard()).unwrap();
        let mut out = Vec::new();
        out.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&header_bytes);
        out.extend_from_slice(payload);
        out
    }

    fn payload() -> Vec<u8> {
        bincode::serde::encode_to_vec(sample(), bincode::config::standard()).unwrap()
    }

    #[test]
    fn file_roundtrip_keeps_subsecond_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout_gamepad.xml.asset");
        write_record_file(&path, &sample()).unwrap();

        let back = read_record_file(&path).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn file_is_gzip_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.asset");
        write_record_file(&path, &sample()).unwrap();
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn plain_garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.asset");
        std::fs::write(&path, b"garbage data").unwrap();
        assert!(matches!(
            read_record_file(&path),
            Err(CacheError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let err = decode_record(Path::new("t.asset"), b"AB").unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));

        let mut raw = encode_record(&sample()).unwrap();
        raw.truncate(6);
        let err = decode_record(Path::new("t.asset"), &raw).unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let payload = payload();
        let header = RecordHeader {
            magic: *b"BAAD",
            format_version: RECORD_FORMAT_VERSION,
            checksum: ContentHash::from_bytes(&payload),
        };
        let err = decode_record(Path::new("m.asset"), &frame(&header, &payload)).unwrap_err();
        assert!(matches!(err, CacheError::InvalidHeader { .. }));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let payload = payload();
        let header = RecordHeader {
            magic: RECORD_MAGIC,
            format_version: 999,
            checksum: ContentHash::from_bytes(&payload),
        };
        let err = decode_record(Path::new("v.asset"), &frame(&header, &payload)).unwrap_err();
        assert!(matches!(
            err,
            CacheError::VersionMismatch { actual: 999, .. }
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let mut payload = payload();
        let header = RecordHeader {
            magic: RECORD_MAGIC,
            format_version: RECORD_FORMAT_VERSION,
            checksum: ContentHash::from_bytes(&payload),
        };
        let last = payload.len() - 1;
        payload[last] ^= 0xff;
        let err = decode_record(Path::new("c.asset"), &frame(&header, &payload)).unwrap_err();
        assert!(matches!(err, CacheError::ChecksumMismatch { .. }));
    }

    #[test]
    fn undecodable_payload_is_rejected() {
        let payload = vec![0xff; 3];
        let header = RecordHeader {
            magic: RECORD_MAGIC,
            format_version: RECORD_FORMAT_VERSION,
            checksum: ContentHash::from_bytes(&payload),
        };
        let err = decode_record(Path::new("p.asset"), &frame(&header, &payload)).unwrap_err();
        assert!(matches!(err, CacheError::Serialization { .. }));
    }
}
