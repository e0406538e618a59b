//! Transposition engine
//!
//! Interval arithmetic, enharmonic spelling, Nashville rendering, and
//! the structured-document walker. Everything here is a pure function
//! of its inputs: no I/O, no shared state, no logging. Diagnostics
//! flow through the caller-injected sink and the returned report.

pub mod chord_transpose;
pub mod errors;
pub mod nashville;
pub mod spelling;
pub mod walker;

// Re-export commonly used types
pub use chord_transpose::{transpose_chord, transpose_text};
pub use errors::{LeafError, TransposeError};
pub use nashville::{nashville_chord, nashville_document, nashville_document_with, nashville_text};
pub use walker::{
    guess_key_from_document, guess_key_from_text, transpose_document, transpose_document_with,
    DiagnosticSink, LeafFailure, TransposeOptions, TransposeOutcome, TransposeReport,
};
