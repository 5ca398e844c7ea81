//! # Store Errors
//!
//! Every backend reports failures through [`StoreError`], so the service and the
//! view never need to know which store they are talking to.

use thiserror::Error;

/// Errors that can occur while reading or writing the inventory collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the credentials or the caller lacks access.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The store refused the request because a quota or rate limit was hit.
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-success answer from the remote API.
    #[error("Store API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A stored document does not carry a usable quantity.
    #[error("Malformed document {key}: {reason}")]
    MalformedDocument { key: String, reason: String },

    /// Incrementing would exceed the largest representable quantity.
    #[error("Quantity overflow for item: {0}")]
    QuantityOverflow(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("Collection actor closed")]
    ActorClosed,

    #[error("Collection actor dropped response channel")]
    ActorDropped,
}
