//! Chunk Reader
//!
//! Decodes fixed-layout records described by a static [`RecordShape`]. A shape
//! is plain data: an ordered list of field widths, names and decode kinds.
//! Field order determines both the byte layout and where each later field
//! begins, so fields are always consumed strictly in declaration order.

use crate::buffer::{self, RawBuffer};
use crate::error::DecodeError;
use crate::types::Offset;

/// How a field's raw bytes are turned into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Byte,
    U32,
    F64,
    Ascii,
    Raw,
}

/// One field in a record layout
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub len: usize,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(len: usize, name: &'static str, kind: FieldKind) -> Self {
        Self { len, name, kind }
    }
}

/// Named, ordered record layout
#[derive(Debug)]
pub struct RecordShape {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordShape {
    /// Total byte width of the record
    pub const fn len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].len;
            i += 1;
        }
        total
    }
}

/// Decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Byte(u8),
    U32(u32),
    F64(f64),
    Text(String),
    Raw(Vec<u8>),
}

/// A decoded record together with the offset just past it
#[derive(Debug, Clone)]
pub struct Chunk {
    shape: &'static RecordShape,
    values: Vec<FieldValue>,
    pub end: Offset,
}

impl Chunk {
    fn value(&self, field: &'static str) -> Result<&FieldValue, DecodeError> {
        self.shape
            .fields
            .iter()
            .position(|f| f.name == field)
            .and_then(|i| self.values.get(i))
            .ok_or(DecodeError::FieldMismatch {
                record: self.shape.name,
                field,
            })
    }

    fn mismatch(&self, field: &'static str) -> DecodeError {
        DecodeError::FieldMismatch {
            record: self.shape.name,
            field,
        }
    }

    pub fn byte(&self, field: &'static str) -> Result<u8, DecodeError> {
        match self.value(field)? {
            FieldValue::Byte(v) => Ok(*v),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn u32(&self, field: &'static str) -> Result<u32, DecodeError> {
        match self.value(field)? {
            FieldValue::U32(v) => Ok(*v),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn f64(&self, field: &'static str) -> Result<f64, DecodeError> {
        match self.value(field)? {
            FieldValue::F64(v) => Ok(*v),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn text(&self, field: &'static str) -> Result<&str, DecodeError> {
        match self.value(field)? {
            FieldValue::Text(v) => Ok(v),
            _ => Err(self.mismatch(field)),
        }
    }

    pub fn raw(&self, field: &'static str) -> Result<&[u8], DecodeError> {
        match self.value(field)? {
            FieldValue::Raw(v) => Ok(v),
            _ => Err(self.mismatch(field)),
        }
    }
}

/// Read a record of the given shape starting at `offset`.
///
/// Fails with `TruncatedRecord` on the first field whose range leaves the
/// buffer; nothing decoded before that point is returned.
pub fn read_chunk(
    buf: &RawBuffer,
    shape: &'static RecordShape,
    offset: Offset,
) -> Result<Chunk, DecodeError> {
    let truncated = |field: &'static str, at: Offset, needed: usize| DecodeError::TruncatedRecord {
        record: shape.name,
        field,
        offset: at,
        needed,
        len: buf.len(),
    };

    if offset > buf.len() {
        let first = shape.fields.first().map(|f| f.name).unwrap_or("");
        return Err(truncated(first, offset, shape.len()));
    }

    let mut cursor = offset;
    let mut values = Vec::with_capacity(shape.fields.len());
    for field in shape.fields {
        let bytes = buf
            .range(cursor, field.len)
            .ok_or_else(|| truncated(field.name, cursor, field.len))?;
        values.push(decode_field(shape, field, bytes)?);
        cursor += field.len;
    }

    Ok(Chunk {
        shape,
        values,
        end: cursor,
    })
}

fn decode_field(
    shape: &'static RecordShape,
    field: &FieldSpec,
    bytes: &[u8],
) -> Result<FieldValue, DecodeError> {
    let mismatch = || DecodeError::FieldMismatch {
        record: shape.name,
        field: field.name,
    };
    let value = match field.kind {
        FieldKind::Byte => FieldValue::Byte(buffer::to_byte(bytes).ok_or_else(mismatch)?),
        FieldKind::U32 => FieldValue::U32(buffer::to_u32(bytes).ok_or_else(mismatch)?),
        FieldKind::F64 => FieldValue::F64(buffer::to_f64(bytes).ok_or_else(mismatch)?),
        FieldKind::Ascii => FieldValue::Text(buffer::to_text(bytes)),
        FieldKind::Raw => FieldValue::Raw(bytes.to_vec()),
    };
    Ok(value)
}
