//! Raw Buffer
//!
//! Owns the container bytes for the duration of a decode and hands out
//! bounds-checked views. Every offset in the format is absolute into this
//! buffer, so every read goes through `range` instead of slicing directly.

use crate::types::Offset;

/// Immutable owned copy of a container's bytes
#[derive(Debug, Clone)]
pub struct RawBuffer {
    data: Vec<u8>,
}

impl RawBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow `len` bytes at `offset`, or `None` if any part of the range
    /// falls outside the buffer (including arithmetic overflow).
    pub fn range(&self, offset: Offset, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Borrow everything from `offset` to the end of the buffer.
    pub fn tail(&self, offset: Offset) -> Option<&[u8]> {
        self.data.get(offset..)
    }
}

impl From<Vec<u8>> for RawBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// Decode a single byte.
pub fn to_byte(bytes: &[u8]) -> Option<u8> {
    bytes.first().copied()
}

/// Decode a big-endian 32-bit unsigned integer.
pub fn to_u32(bytes: &[u8]) -> Option<u32> {
    let array: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(array))
}

/// Decode a big-endian IEEE-754 double.
pub fn to_f64(bytes: &[u8]) -> Option<f64> {
    let array: [u8; 8] = bytes.get(..8)?.try_into().ok()?;
    Some(f64::from_be_bytes(array))
}

/// Decode fixed-length text. Non-UTF-8 bytes are replaced rather than rejected.
pub fn to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
