//! Shared helpers for WASM API operations
//!
//! Common serialization, deserialization, and key-validation patterns
//! used by every JavaScript-facing entry point.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::key::Key;

/// Deserialize a value from JavaScript with automatic error handling.
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Parse a key string at the boundary, surfacing the validation error
/// to JavaScript instead of coercing it.
pub fn parse_key_arg(input: &str) -> Result<Key, JsValue> {
    input.parse::<Key>().map_err(|e| {
        log::warn!("{}", e);
        JsValue::from_str(&e.to_string())
    })
}
