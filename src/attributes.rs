//! Attribute Table Decoder
//!
//! Metadata keys are stored once in a table and referenced everywhere else by
//! index. Names are held as `Arc<str>` so every metadata entry shares the
//! table's allocation instead of copying the text.

use crate::buffer::RawBuffer;
use crate::chunk::{read_chunk, FieldKind, FieldSpec, RecordShape};
use crate::error::DecodeError;
use crate::strings::read_indirect_string;
use crate::types::{Offset, WORD_LEN};
use serde::Serialize;
use std::sync::Arc;

static TABLE_COUNT: RecordShape = RecordShape {
    name: "attribute table",
    fields: &[FieldSpec::new(WORD_LEN, "count", FieldKind::U32)],
};

/// Ordered attribute names; position is the key used by metadata records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeTable {
    names: Vec<Arc<str>>,
}

impl AttributeTable {
    pub fn new(names: Vec<Arc<str>>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, key: u32) -> Option<&Arc<str>> {
        self.names.get(key as usize)
    }

    /// Look up `key`, failing with `UnknownAttributeKey` if it is out of range.
    ///
    /// `path` is only used to say where the bad key was found.
    pub fn resolve(&self, key: u32, path: &str) -> Result<Arc<str>, DecodeError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownAttributeKey {
                key,
                table_len: self.len(),
                path: path.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }

    /// Key of the first attribute with this name
    pub fn position(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n.as_ref() == name)
            .map(|i| i as u32)
    }
}

/// Decode the attribute table at `offset`.
pub fn decode_attributes(buf: &RawBuffer, offset: Offset) -> Result<AttributeTable, DecodeError> {
    let count = read_chunk(buf, &TABLE_COUNT, offset)?.u32("count")? as usize;

    // Every slot must lie inside the buffer before any is read
    let slots_start = offset + WORD_LEN;
    let last_slot_end = count
        .checked_mul(WORD_LEN)
        .and_then(|n| slots_start.checked_add(n));
    if last_slot_end.map_or(true, |end| end > buf.len()) {
        let first_missing = buf.len().saturating_sub(slots_start) / WORD_LEN;
        return Err(DecodeError::TruncatedTable {
            offset,
            index: first_missing,
            count,
            len: buf.len(),
        });
    }

    let mut names: Vec<Arc<str>> = Vec::with_capacity(count);
    for i in 0..count {
        let slot = slots_start + WORD_LEN * i;
        let name = read_indirect_string(buf, slot)?;
        names.push(Arc::from(name));
    }

    Ok(AttributeTable::new(names))
}
