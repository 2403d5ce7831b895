//! Directory Tree Decoder
//!
//! Walks the node graph from the root offset. Each node is a 16-byte header
//! pointing at a name string, a children block and a metadata block:
//!
//! ```text
//! node:           name ptr(4) | children off(4) | metadata off(4) | last changed(4)
//! children block: count(4) | count × node(16)
//! metadata block: count(4) | count × (key(4) | value ptr(4))
//! ```
//!
//! Nothing in the format prevents a children offset from pointing back at an
//! ancestor, so traversal is bounded by both a depth and a node budget.
//! Names are shared through pointers, so composed paths are bounded too: per
//! path, and in total across the tree.

use crate::attributes::AttributeTable;
use crate::buffer::RawBuffer;
use crate::chunk::{read_chunk, FieldKind, FieldSpec, RecordShape};
use crate::config::DecoderConfig;
use crate::error::{path_excerpt, DecodeError};
use crate::strings::read_string;
use crate::tree::index::{compose_path, FlatIndex, IndexBuilder};
use crate::tree::node::{DirectoryNode, MetadataEntry, RawNode};
use crate::types::{Offset, METADATA_PAIR_LEN, NODE_DESCRIPTOR_LEN, WORD_LEN};
use tracing::debug;

static NODE: RecordShape = RecordShape {
    name: "node",
    fields: &[
        FieldSpec::new(4, "name", FieldKind::U32),
        FieldSpec::new(4, "children", FieldKind::U32),
        FieldSpec::new(4, "metadata", FieldKind::U32),
        FieldSpec::new(4, "last_changed", FieldKind::U32),
    ],
};

static CHILDREN_BLOCK: RecordShape = RecordShape {
    name: "children block",
    fields: &[FieldSpec::new(WORD_LEN, "count", FieldKind::U32)],
};

static METADATA_BLOCK: RecordShape = RecordShape {
    name: "metadata block",
    fields: &[FieldSpec::new(WORD_LEN, "count", FieldKind::U32)],
};

static METADATA_PAIR: RecordShape = RecordShape {
    name: "metadata pair",
    fields: &[
        FieldSpec::new(4, "key", FieldKind::U32),
        FieldSpec::new(4, "value", FieldKind::U32),
    ],
};

/// Single-use decoder for one tree
pub struct TreeDecoder<'a> {
    buf: &'a RawBuffer,
    attributes: &'a AttributeTable,
    config: &'a DecoderConfig,
    index: IndexBuilder,
    nodes: usize,
    path_bytes: usize,
}

impl<'a> TreeDecoder<'a> {
    pub fn new(
        buf: &'a RawBuffer,
        attributes: &'a AttributeTable,
        config: &'a DecoderConfig,
    ) -> Self {
        Self {
            buf,
            attributes,
            config,
            index: IndexBuilder::new(config.duplicate_paths),
            nodes: 0,
            path_bytes: 0,
        }
    }

    /// Decode the tree rooted at `root`, returning it with its flat index.
    pub fn decode(mut self, root: Offset) -> Result<(DirectoryNode, FlatIndex), DecodeError> {
        let tree = self.decode_node(root, "", 0)?;
        Ok((tree, self.index.finish()))
    }

    fn decode_node(
        &mut self,
        offset: Offset,
        parent_path: &str,
        depth: usize,
    ) -> Result<DirectoryNode, DecodeError> {
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                max_depth: self.config.max_depth,
                path: path_excerpt(parent_path),
            });
        }
        self.nodes += 1;
        if self.nodes > self.config.max_nodes {
            return Err(DecodeError::NodeLimitExceeded {
                max_nodes: self.config.max_nodes,
            });
        }

        let raw = self.read_raw_node(offset)?;
        self.check_path(parent_path, &raw.name)?;
        let child_offsets = self.read_children(raw.children_offset as Offset)?;
        let path = compose_path(parent_path, &raw.name, depth == 0, child_offsets.len());
        let metadata = self.read_metadata(raw.metadata_offset as Offset, &path)?;

        debug!(
            offset = raw.offset,
            path = %path,
            children = child_offsets.len(),
            metadata = metadata.len(),
            "Decoded node"
        );

        self.index.record(&path, &metadata)?;

        let mut children = Vec::with_capacity(child_offsets.len());
        for child in child_offsets {
            children.push(self.decode_node(child, &path, depth + 1)?);
        }

        Ok(DirectoryNode {
            name: raw.name,
            path,
            last_changed: raw.last_changed,
            metadata,
            children,
        })
    }

    /// Enforce the path limits before `name` is appended to `parent_path`.
    fn check_path(&mut self, parent_path: &str, name: &str) -> Result<(), DecodeError> {
        let len = parent_path.len() + name.len();
        if len > self.config.max_path_len {
            return Err(DecodeError::PathTooLong {
                max_path_len: self.config.max_path_len,
                len,
                path: path_excerpt(parent_path),
            });
        }
        // +1 for a possible trailing separator
        self.path_bytes += len + 1;
        if self.path_bytes > self.config.max_path_bytes {
            return Err(DecodeError::PathBudgetExceeded {
                max_path_bytes: self.config.max_path_bytes,
            });
        }
        Ok(())
    }

    fn read_raw_node(&self, offset: Offset) -> Result<RawNode, DecodeError> {
        let chunk = read_chunk(self.buf, &NODE, offset)?;
        let name = read_string(self.buf, chunk.u32("name")? as Offset)?;
        Ok(RawNode {
            offset,
            name,
            children_offset: chunk.u32("children")?,
            metadata_offset: chunk.u32("metadata")?,
            last_changed: chunk.u32("last_changed")?,
        })
    }

    /// Offsets of each child descriptor in the block at `offset`
    fn read_children(&self, offset: Offset) -> Result<Vec<Offset>, DecodeError> {
        let block = read_chunk(self.buf, &CHILDREN_BLOCK, offset)?;
        let count = block.u32("count")? as usize;
        let start = self.check_array(&CHILDREN_BLOCK, block.end, count, NODE_DESCRIPTOR_LEN)?;
        Ok((0..count).map(|i| start + NODE_DESCRIPTOR_LEN * i).collect())
    }

    fn read_metadata(&self, offset: Offset, path: &str) -> Result<Vec<MetadataEntry>, DecodeError> {
        let block = read_chunk(self.buf, &METADATA_BLOCK, offset)?;
        let count = block.u32("count")? as usize;
        let start = self.check_array(&METADATA_BLOCK, block.end, count, METADATA_PAIR_LEN)?;

        let mut metadata = Vec::with_capacity(count);
        for i in 0..count {
            let pair = read_chunk(self.buf, &METADATA_PAIR, start + METADATA_PAIR_LEN * i)?;
            let attribute = self.attributes.resolve(pair.u32("key")?, path)?;
            let value = read_string(self.buf, pair.u32("value")? as Offset)?;
            metadata.push(MetadataEntry { attribute, value });
        }
        Ok(metadata)
    }

    /// Ensure `count` records of `stride` bytes starting at `start` fit in
    /// the buffer, returning `start`.
    fn check_array(
        &self,
        shape: &'static RecordShape,
        start: Offset,
        count: usize,
        stride: usize,
    ) -> Result<Offset, DecodeError> {
        let needed = count.checked_mul(stride);
        let fits = needed
            .and_then(|n| start.checked_add(n))
            .is_some_and(|end| end <= self.buf.len());
        if !fits {
            return Err(DecodeError::TruncatedRecord {
                record: shape.name,
                field: "entries",
                offset: start,
                needed: needed.unwrap_or(usize::MAX),
                len: self.buf.len(),
            });
        }
        Ok(start)
    }
}
