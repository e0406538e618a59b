//! Data models for the transposition engine
//!
//! This module contains the key, chord token, and document tree types
//! shared by the parser, the transposer, and the WASM boundary.

pub mod chord;
pub mod document;
pub mod key;

// Re-export commonly used types
pub use chord::{quality_is_valid, Accidental, ChordToken, NoteLetter, NoteName, QUALITY_SUFFIXES};
pub use document::Node;
pub use key::{semitone_distance, Key, KeyParseError, Mode};
