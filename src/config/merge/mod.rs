//! Config composition: defaults, then file sources, then environment.

pub(crate) mod merge_policy;
pub mod service;
