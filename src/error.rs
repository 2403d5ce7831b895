//! Error types for decoding and for the outer CLI layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while decoding a container. Every variant is fatal: no partial
/// tree or index is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid format: magic {} does not match signature", hex::encode(.found))]
    InvalidFormat { found: Vec<u8> },

    #[error(
        "Truncated {record} record: field `{field}` at offset {offset} needs {needed} bytes, buffer is {len}"
    )]
    TruncatedRecord {
        record: &'static str,
        field: &'static str,
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Truncated attribute table at {offset}: slot {index} of {count} is past end of {len}-byte buffer")]
    TruncatedTable {
        offset: usize,
        index: usize,
        count: usize,
        len: usize,
    },

    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unknown attribute key {key} (table has {table_len} entries) at path {path:?}")]
    UnknownAttributeKey {
        key: u32,
        table_len: usize,
        path: String,
    },

    #[error("Maximum traversal depth {max_depth} exceeded at path {path:?}")]
    DepthExceeded { max_depth: usize, path: String },

    #[error("Node limit {max_nodes} exceeded")]
    NodeLimitExceeded { max_nodes: usize },

    #[error("Path of {len} bytes exceeds limit {max_path_len} at {path:?}")]
    PathTooLong {
        max_path_len: usize,
        len: usize,
        path: String,
    },

    #[error("Composed paths exceed {max_path_bytes} bytes in total")]
    PathBudgetExceeded { max_path_bytes: usize },

    #[error("Duplicate path {path:?}")]
    DuplicatePath { path: String },

    #[error("Field `{field}` of {record} record read with the wrong kind")]
    FieldMismatch {
        record: &'static str,
        field: &'static str,
    },
}

impl DecodeError {
    /// True for failures caused by a read running off the end of the buffer.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            DecodeError::TruncatedRecord { .. }
                | DecodeError::TruncatedTable { .. }
                | DecodeError::UnterminatedString { .. }
        )
    }
}

const PATH_EXCERPT_LEN: usize = 256;

/// Leading part of `path` for error messages, cut on a char boundary.
pub(crate) fn path_excerpt(path: &str) -> String {
    if path.len() <= PATH_EXCERPT_LEN {
        return path.to_string();
    }
    let mut end = PATH_EXCERPT_LEN;
    while !path.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &path[..end])
}

/// Errors surfaced by configuration, logging and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}
