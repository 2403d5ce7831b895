//! Path/Index Assembler
//!
//! Composes node paths during traversal and collects the flat
//! path → metadata index as a side product of the tree walk.

use crate::config::DuplicatePolicy;
use crate::error::DecodeError;
use crate::tree::node::MetadataEntry;
use crate::types::PATH_SEPARATOR;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Compose a node's path from its parent's path and its own name.
///
/// Non-root nodes with children get a trailing separator so that child paths
/// compose by plain concatenation. The root never carries one.
pub fn compose_path(parent_path: &str, name: &str, is_root: bool, child_count: usize) -> String {
    let mut path = String::with_capacity(parent_path.len() + name.len() + 1);
    path.push_str(parent_path);
    path.push_str(name);
    if !is_root && child_count > 0 {
        path.push(PATH_SEPARATOR);
    }
    path
}

/// Path → metadata for every node whose metadata is non-empty
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatIndex {
    entries: BTreeMap<String, Vec<MetadataEntry>>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&[MetadataEntry]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MetadataEntry])> {
        self.entries
            .iter()
            .map(|(path, metadata)| (path.as_str(), metadata.as_slice()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Builds a [`FlatIndex`] and enforces the duplicate-path policy
pub struct IndexBuilder {
    index: FlatIndex,
    seen: HashSet<String>,
    policy: DuplicatePolicy,
}

impl IndexBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            index: FlatIndex::new(),
            seen: HashSet::new(),
            policy,
        }
    }

    /// Record a visited node.
    ///
    /// Every path is tracked, with or without metadata, so two nodes that
    /// compose to the same path are caught either way. Under `Warn` the
    /// first node's index entry is kept.
    pub fn record(&mut self, path: &str, metadata: &[MetadataEntry]) -> Result<(), DecodeError> {
        if !self.seen.insert(path.to_string()) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(DecodeError::DuplicatePath {
                        path: path.to_string(),
                    });
                }
                DuplicatePolicy::Warn => {
                    warn!(path, "Duplicate path; keeping first index entry");
                    return Ok(());
                }
            }
        }

        if !metadata.is_empty() {
            self.index
                .entries
                .insert(path.to_string(), metadata.to_vec());
        }
        Ok(())
    }

    pub fn finish(self) -> FlatIndex {
        self.index
    }
}
