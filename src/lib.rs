//! Chord Transposition Engine WASM Module
//!
//! Rewrites every chord in a structured lyric document from one
//! musical key to another, leaving prose, whitespace, and document
//! structure untouched. Compiled to WASM for the song-library
//! Mini-App; the engine itself is a pure function of (document,
//! fromKey, toKey) with no I/O and no shared state.

pub mod api;
pub mod models;
pub mod parse;
pub mod transpose;

// Re-export commonly used types
pub use models::chord::ChordToken;
pub use models::document::Node;
pub use models::key::{semitone_distance, Key, KeyParseError, Mode};
pub use transpose::{
    guess_key_from_document, guess_key_from_text, nashville_document, nashville_text,
    transpose_document, transpose_document_with, transpose_text, LeafError, LeafFailure,
    TransposeError, TransposeOptions, TransposeOutcome, TransposeReport,
};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Info).expect("failed to initialize logger");

    log::info!("transpose-wasm module initialized");
}
