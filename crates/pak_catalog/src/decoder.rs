//! The binary document decoder seam.

use crate::error::DecodeError;

/// Turns an entry's raw bytes into readable text.
pub trait DocumentDecoder {
    /// Decodes `bytes`, or reports why they are not a valid document.
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;
}

impl<T: DocumentDecoder + ?Sized> DocumentDecoder for &T {
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        (**self).decode(bytes)
    }
}
