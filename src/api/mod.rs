//! WASM API for the transposition engine
//!
//! This module provides the JavaScript-facing surface of the engine:
//! document transposition, Nashville rendering, and key validation.
//! Shared serialization and error-handling utilities live in
//! `helpers`; all entry points live in `core`.

pub mod core;
pub mod helpers;

// Re-export all public entry points
pub use self::core::{
    guess_key, key_to_string, parse_key, transpose_document, transpose_text_run,
    transpose_to_nashville,
};
