//! Metatree: Metadata Tree Container Decoder
//!
//! Decodes a binary container holding a directory tree whose nodes carry
//! key/value metadata. All structure is expressed as absolute big-endian
//! offsets into one buffer; the decoder follows them with bounds checks at
//! every step and returns the rebuilt tree plus a flat path → metadata index.
//!
//! ```no_run
//! let bytes = std::fs::read("store.meta")?;
//! let store = metatree::decode(bytes)?;
//! for (path, metadata) in store.index.iter() {
//!     println!("{path}: {} entries", metadata.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attributes;
pub mod buffer;
pub mod chunk;
pub mod config;
pub mod error;
pub mod header;
pub mod logging;
pub mod store;
pub mod strings;
pub mod tooling;
pub mod tree;
pub mod types;

pub use attributes::AttributeTable;
pub use config::{DecoderConfig, DuplicatePolicy};
pub use error::{ApiError, DecodeError};
pub use header::Header;
pub use store::{decode, decode_with, MetaStore};
pub use tree::{DirectoryNode, FlatIndex, MetadataEntry};
