//! Failures of a single sheet read.
//!
//! [`LoadError`] keeps a rejected credential apart from other HTTP failures so
//! the dashboard can ask for a new authorization instead of a generic retry.

use thiserror::Error;

/// Errors that can occur while loading the sheet range.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The API answered 401: the credential was rejected.
    #[error("unauthorized, please authorize again")]
    Unauthorized,

    /// Any other non-success status.
    #[error("HTTP error, status {status}")]
    Http { status: u16 },

    /// Success status, but the body has no `values` field.
    #[error("no data found in the response")]
    MalformedResponse,

    /// The body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport failure (DNS, connection refused, reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
