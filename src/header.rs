//! Header Decoder
//!
//! The 32-byte header at offset 0 names the format, its version, and the
//! offsets of the two structures everything else hangs off: the root
//! directory node and the attribute table.

use crate::buffer::RawBuffer;
use crate::chunk::{read_chunk, FieldKind, FieldSpec, RecordShape};
use crate::error::DecodeError;
use crate::types::{Offset, HEADER_LEN, MAGIC, MAJOR_VERSION, MINOR_VERSION};
use serde::Serialize;
use tracing::warn;

static HEADER: RecordShape = RecordShape {
    name: "header",
    fields: &[
        FieldSpec::new(6, "magic", FieldKind::Raw),
        FieldSpec::new(1, "major", FieldKind::Byte),
        FieldSpec::new(1, "minor", FieldKind::Byte),
        FieldSpec::new(4, "rotated", FieldKind::U32),
        FieldSpec::new(4, "random_tag", FieldKind::U32),
        FieldSpec::new(4, "root_offset", FieldKind::U32),
        FieldSpec::new(4, "attributes_offset", FieldKind::U32),
        FieldSpec::new(8, "timestamp", FieldKind::F64),
    ],
};

/// Decoded file header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    #[serde(serialize_with = "serialize_magic")]
    pub magic: [u8; 6],
    pub major: u8,
    pub minor: u8,
    /// Opaque; carried through without interpretation
    pub rotated: u32,
    /// Opaque; carried through without interpretation
    pub random_tag: u32,
    pub root_offset: u32,
    pub attributes_offset: u32,
    pub timestamp: f64,
}

impl Header {
    pub fn root(&self) -> Offset {
        self.root_offset as Offset
    }

    pub fn attributes(&self) -> Offset {
        self.attributes_offset as Offset
    }

    pub fn version(&self) -> (u8, u8) {
        (self.major, self.minor)
    }

    pub fn magic_hex(&self) -> String {
        hex::encode(self.magic)
    }
}

fn serialize_magic<S>(magic: &[u8; 6], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(magic))
}

/// Decode and validate the header.
///
/// The signature is compared before anything else is read, so a foreign file
/// is rejected with `InvalidFormat` even when it is shorter than a header.
pub fn decode_header(buf: &RawBuffer) -> Result<Header, DecodeError> {
    if let Some(found) = buf.range(0, MAGIC.len()) {
        if found != &MAGIC[..] {
            return Err(DecodeError::InvalidFormat {
                found: found.to_vec(),
            });
        }
    }

    let chunk = read_chunk(buf, &HEADER, 0)?;
    debug_assert_eq!(chunk.end, HEADER_LEN);

    let mut magic = [0u8; 6];
    magic.copy_from_slice(chunk.raw("magic")?);

    let header = Header {
        magic,
        major: chunk.byte("major")?,
        minor: chunk.byte("minor")?,
        rotated: chunk.u32("rotated")?,
        random_tag: chunk.u32("random_tag")?,
        root_offset: chunk.u32("root_offset")?,
        attributes_offset: chunk.u32("attributes_offset")?,
        timestamp: chunk.f64("timestamp")?,
    };

    if header.version() != (MAJOR_VERSION, MINOR_VERSION) {
        warn!(
            major = header.major,
            minor = header.minor,
            "Unexpected format version; decoding with the {}.{} layout",
            MAJOR_VERSION,
            MINOR_VERSION
        );
    }

    Ok(header)
}
