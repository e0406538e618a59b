//! Error types for transposition
//!
//! Two failure families: whole-document failures that abort the call
//! and return no partial result, and per-leaf failures that are
//! recovered locally by the walker (the leaf keeps its original text).

use thiserror::Error;

/// Whole-document transposition failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransposeError {
    /// No source key was supplied and no chord token exists anywhere in
    /// the document to infer one from.
    #[error("cannot resolve source key: no key supplied and no chord token found in the document")]
    UnresolvedSourceKey,
}

/// Per-leaf rewrite failure. Should be rare in normal operation: the
/// tokenizer only emits tokens the transposer accepts, so this guards
/// hand-built tokens and internal invariant violations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeafError {
    /// Quality suffix outside the supported closed set.
    #[error("unsupported quality suffix '{0}'")]
    UnsupportedQuality(String),
}
