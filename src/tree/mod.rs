//! Directory tree decoding
//!
//! Rebuilds the node tree from the offset-linked records in a container and
//! assembles the flat path → metadata index alongside it.

pub mod decoder;
pub mod index;
pub mod node;

pub use decoder::TreeDecoder;
pub use index::{compose_path, FlatIndex};
pub use node::{DirectoryNode, MetadataEntry, RawNode, Walk};
