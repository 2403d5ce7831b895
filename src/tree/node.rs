//! Directory node types: the raw on-disk header and the resolved tree node

use crate::types::Offset;
use serde::Serialize;
use std::sync::Arc;

/// Node header as stored on disk, before its blocks are followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    pub offset: Offset,
    pub name: String,
    pub children_offset: u32,
    pub metadata_offset: u32,
    pub last_changed: u32,
}

/// Resolved metadata pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub attribute: Arc<str>,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(attribute: Arc<str>, value: impl Into<String>) -> Self {
        Self {
            attribute,
            value: value.into(),
        }
    }
}

/// Fully decoded directory node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    pub last_changed: u32,
    pub metadata: Vec<MetadataEntry>,
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Value of the first metadata entry for `attribute`
    pub fn attribute(&self, attribute: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|m| m.attribute.as_ref() == attribute)
            .map(|m| m.value.as_str())
    }

    /// Depth-first, pre-order walk over this node and all descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        self.walk().count()
    }

    /// Find the node in this subtree whose composed path equals `path`
    pub fn find(&self, path: &str) -> Option<&DirectoryNode> {
        self.walk().find(|n| n.path == path)
    }
}

/// Iterator returned by [`DirectoryNode::walk`]
pub struct Walk<'a> {
    stack: Vec<&'a DirectoryNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DirectoryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is visited first
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
