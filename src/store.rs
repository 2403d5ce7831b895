//! MetaStore
//!
//! Entry point for decoding a container: header first, then the attribute
//! table, then the tree from the root offset. The result owns everything it
//! needs; the raw buffer is dropped once decoding returns.

use crate::attributes::{decode_attributes, AttributeTable};
use crate::buffer::RawBuffer;
use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::header::{decode_header, Header};
use crate::tree::{DirectoryNode, FlatIndex, MetadataEntry, TreeDecoder};
use serde::Serialize;
use std::path::Path;
use tracing::{debug_span, info};

/// A fully decoded container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaStore {
    pub header: Header,
    pub attributes: AttributeTable,
    pub root: DirectoryNode,
    pub index: FlatIndex,
}

impl MetaStore {
    /// Read and decode the file at `path`.
    pub fn open(path: impl AsRef<Path>, config: &DecoderConfig) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode_with(bytes, config)
    }

    /// Read the file without blocking the runtime, then decode it.
    ///
    /// Decoding starts only once the whole file is in memory.
    pub async fn open_async(
        path: impl AsRef<Path>,
        config: &DecoderConfig,
    ) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DecodeError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        decode_with(bytes, config)
    }

    /// Metadata indexed under `path`, if that node has any.
    pub fn lookup(&self, path: &str) -> Option<&[MetadataEntry]> {
        self.index.get(path)
    }

    /// Tree node whose composed path is `path`.
    pub fn find(&self, path: &str) -> Option<&DirectoryNode> {
        self.root.find(path)
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }
}

/// Decode a container with the default limits.
pub fn decode(bytes: Vec<u8>) -> Result<MetaStore, DecodeError> {
    decode_with(bytes, &DecoderConfig::default())
}

/// Decode a container.
pub fn decode_with(bytes: Vec<u8>, config: &DecoderConfig) -> Result<MetaStore, DecodeError> {
    let buf = RawBuffer::new(bytes);
    let span = debug_span!("decode", len = buf.len());
    let _enter = span.enter();

    let header = decode_header(&buf)?;
    let attributes = decode_attributes(&buf, header.attributes())?;
    let (root, index) = TreeDecoder::new(&buf, &attributes, config).decode(header.root())?;

    let store = MetaStore {
        header,
        attributes,
        root,
        index,
    };

    info!(
        nodes = store.node_count(),
        attributes = store.attributes.len(),
        indexed = store.index.len(),
        "Decoded container"
    );

    Ok(store)
}
