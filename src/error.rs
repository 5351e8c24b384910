//! Cart Errors

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type CartResult<T> = Result<T, CartError>;

/// Failure talking to the cart endpoints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The fetch itself was rejected (offline, CORS, aborted)
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The server answered with `success: false`
    #[error("{}", .0.as_deref().unwrap_or("rejected by server"))]
    Rejected(Option<String>),
    #[error("add-to-cart control has no book id")]
    MissingBookId,
}

/// Readable text for a thrown JS value
pub fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
