//! JavaScript-facing API for the transposition engine
//!
//! Documents and keys cross the boundary as plain JS values via
//! serde-wasm-bindgen; errors come back as string `JsValue`s. The
//! lyric-display collaborator calls `transposeDocument` when the user
//! changes the selected key; the key-selection UI validates its input
//! through `parseKey`/`keyToString` before ever invoking transposition.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, parse_key_arg, serialize};
use crate::models::document::Node;
use crate::models::key::Key;
use crate::transpose::walker::LeafFailure;
use crate::transpose::{
    guess_key_from_document, nashville_document_with, transpose_document_with, transpose_text,
    TransposeOptions,
};

/// Transpose every chord in `document` from `from_key` to `to_key`.
///
/// `from_key` may be omitted, in which case the source key is inferred
/// from the first chord in document order (`report.key_inferred` is set
/// so the UI can tell). `on_leaf_failure` is an optional callback
/// invoked once per leaf the engine had to leave untouched.
///
/// Returns `{ document, report }`; fails when `to_key` (or a supplied
/// `from_key`) is malformed, or when no source key can be resolved at
/// all. On failure the display layer keeps showing the original.
#[wasm_bindgen(js_name = transposeDocument)]
pub fn transpose_document(
    document: JsValue,
    from_key: Option<String>,
    to_key: String,
    on_leaf_failure: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let root: Node = deserialize(document, "Invalid document")?;
    let from = match from_key {
        Some(key) => Some(parse_key_arg(&key)?),
        None => None,
    };
    let to = parse_key_arg(&to_key)?;

    let mut forward = |failure: &LeafFailure| {
        log::warn!(
            "leaf {} left in original key: {}",
            failure.leaf_index,
            failure.reason
        );
        notify(&on_leaf_failure, failure);
    };

    let outcome = transpose_document_with(
        &root,
        from,
        to,
        &TransposeOptions::default(),
        Some(&mut forward),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serialize(&outcome, "Failed to serialize transposition outcome")
}

/// Render every chord in `document` as Nashville numbers relative to
/// `from_key` (or the inferred key when omitted).
#[wasm_bindgen(js_name = transposeToNashville)]
pub fn transpose_to_nashville(
    document: JsValue,
    from_key: Option<String>,
    on_leaf_failure: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let root: Node = deserialize(document, "Invalid document")?;
    let from = match from_key {
        Some(key) => Some(parse_key_arg(&key)?),
        None => None,
    };

    let mut forward = |failure: &LeafFailure| {
        log::warn!(
            "leaf {} left unnumbered: {}",
            failure.leaf_index,
            failure.reason
        );
        notify(&on_leaf_failure, failure);
    };

    let outcome = nashville_document_with(
        &root,
        from,
        &TransposeOptions::default(),
        Some(&mut forward),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serialize(&outcome, "Failed to serialize Nashville outcome")
}

/// Transpose a single text run (e.g. a metadata line) between keys.
#[wasm_bindgen(js_name = transposeText)]
pub fn transpose_text_run(
    text: String,
    from_key: String,
    to_key: String,
) -> Result<String, JsValue> {
    let from = parse_key_arg(&from_key)?;
    let to = parse_key_arg(&to_key)?;
    transpose_text(&text, from, to).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate and canonicalize a key string. Returns the parsed key as a
/// `{ pitch_class, mode }` object; malformed input is a validation
/// error, never coerced.
#[wasm_bindgen(js_name = parseKey)]
pub fn parse_key(input: String) -> Result<JsValue, JsValue> {
    let key = parse_key_arg(&input)?;
    serialize(&key, "Failed to serialize key")
}

/// Canonical string form of a parsed key ("Eb", "F#m").
#[wasm_bindgen(js_name = keyToString)]
pub fn key_to_string(key: JsValue) -> Result<String, JsValue> {
    let key: Key = deserialize(key, "Invalid key object")?;
    Ok(key.to_string())
}

/// Best-effort key guess from the first chord in the document, or JS
/// `null` when the document contains no chord at all.
#[wasm_bindgen(js_name = guessKey)]
pub fn guess_key(document: JsValue) -> Result<JsValue, JsValue> {
    let root: Node = deserialize(document, "Invalid document")?;
    match guess_key_from_document(&root) {
        Some(key) => serialize(&key, "Failed to serialize key"),
        None => Ok(JsValue::NULL),
    }
}

fn notify(callback: &Option<js_sys::Function>, failure: &LeafFailure) {
    if let Some(callback) = callback {
        if let Ok(value) = serde_wasm_bindgen::to_value(failure) {
            // Callback errors are the caller's problem; the walk goes on.
            let _ = callback.call1(&JsValue::NULL, &value);
        }
    }
}
