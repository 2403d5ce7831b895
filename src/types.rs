//! Core constants and aliases for the container format.

/// Offset: absolute byte position into the decoded buffer
pub type Offset = usize;

/// Signature occupying the first six bytes of every container
pub const MAGIC: &[u8; 6] = b"\xda\x1ameta";

/// Format version this decoder was written against
pub const MAJOR_VERSION: u8 = 1;
pub const MINOR_VERSION: u8 = 0;

/// Separator placed between a directory's path and its children's names
pub const PATH_SEPARATOR: char = '/';

/// Size of the fixed file header
pub const HEADER_LEN: usize = 32;

/// Size of one node descriptor in a children block
pub const NODE_DESCRIPTOR_LEN: usize = 16;

/// Size of one key/value pair in a metadata block
pub const METADATA_PAIR_LEN: usize = 8;

/// Size of a count prefix or a string pointer
pub const WORD_LEN: usize = 4;
