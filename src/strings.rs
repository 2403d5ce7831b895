//! String Resolver
//!
//! Strings live in a shared pool and are referenced by absolute offset. A
//! string is the run of bytes up to (not including) the next zero byte.

use crate::buffer::{self, RawBuffer};
use crate::chunk::{read_chunk, FieldKind, FieldSpec, RecordShape};
use crate::error::DecodeError;
use crate::types::{Offset, WORD_LEN};

static STRING_POINTER: RecordShape = RecordShape {
    name: "string pointer",
    fields: &[FieldSpec::new(WORD_LEN, "offset", FieldKind::U32)],
};

/// Read the null-terminated string starting at `offset`.
pub fn read_string(buf: &RawBuffer, offset: Offset) -> Result<String, DecodeError> {
    let tail = buf
        .tail(offset)
        .ok_or(DecodeError::UnterminatedString { offset })?;
    let end = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::UnterminatedString { offset })?;
    Ok(buffer::to_text(&tail[..end]))
}

/// Read a 4-byte pointer at `offset` and resolve the string it points to.
pub fn read_indirect_string(buf: &RawBuffer, offset: Offset) -> Result<String, DecodeError> {
    let target = read_chunk(buf, &STRING_POINTER, offset)?.u32("offset")?;
    read_string(buf, target as Offset)
}
