//! Content hashing for cache record integrity checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit content hash computed using XXH3.
///
/// Stored in the header of every cache record file so that a truncated or
/// tampered payload is detected on load instead of being served as content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &[u8] = b"<ActionMaps><actionmap name=\"spaceship_movement\"/></ActionMaps>";

    #[test]
    fn single_flipped_byte_is_detected() {
        let mut damaged = LAYOUT.to_vec();
        damaged[10] ^= 0x01;
        assert_ne!(ContentHash::from_bytes(LAYOUT), ContentHash::from_bytes(&damaged));
    }

    #[test]
    fn truncated_payload_is_detected() {
        let truncated = &LAYOUT[..LAYOUT.len() - 1];
        assert_ne!(ContentHash::from_bytes(LAYOUT), ContentHash::from_bytes(truncated));
    }

    #[test]
    fn empty_payload_hash_is_stable() {
        // Marker records carry no content; their checksum must still verify.
        assert_eq!(ContentHash::from_bytes(b""), ContentHash::from_bytes(&[]));
        assert_ne!(ContentHash::from_bytes(b""), ContentHash::from_bytes(b"\0"));
    }

    #[test]
    fn display_and_debug() {
        let h = ContentHash::from_bytes(LAYOUT);
        let hex = h.to_string();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(format!("{h:?}"), format!("ContentHash({}..)", &hex[..4]));
    }

    #[test]
    fn survives_serialization() {
        let h = ContentHash::from_bytes(LAYOUT);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(serde_json::from_str::<ContentHash>(&json).unwrap(), h);
    }
}
