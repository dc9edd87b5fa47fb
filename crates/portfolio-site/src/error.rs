//! Unified error handling for the site controllers

use thiserror::Error;

/// Unified error type for all site operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    /// JavaScript interop error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// The form relay could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The form relay answered with a non-success status.
    #[error("Relay rejected submission with status {0}")]
    Status(u16),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A submission is already waiting for the relay.
    #[error("A submission is already in flight")]
    SubmissionInFlight,
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(js_val: wasm_bindgen::JsValue) -> Self {
        let message = js_val
            .as_string()
            .unwrap_or_else(|| format!("{js_val:?}"));
        SiteError::JavaScript(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;
