//! Error types for the brandpage library.
//!
//! A single fatal error type, [`BrandPageError`], covers everything that stops
//! a page from being generated. Anything short of that degrades silently into
//! partial output instead of failing:
//!
//! * a completion response without `choices` / `text` becomes an empty page,
//! * a placeholder sentinel the model did not echo back stays unfilled,
//! * a feature slot without a matching image gets `<img src="">`.
//!
//! Rate limits, bad keys and server faults from the remote API are all the same
//! [`BrandPageError::Api`] variant; the status code and raw body are carried
//! verbatim for the caller to display.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the brandpage library.
#[derive(Debug, Error)]
pub enum BrandPageError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The page configuration or generator settings failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An image file could not be read from disk.
    #[error("Failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Remote API errors ─────────────────────────────────────────────────
    /// The completion endpoint answered with a non-200 status.
    #[error("API error: {status}, {body}")]
    Api { status: u16, body: String },

    /// The request never produced an HTTP response (DNS, TLS, timeout, …).
    #[error("Request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered 200 but the body was not JSON.
    #[error("Completion endpoint returned an undecodable body: {0}")]
    MalformedResponse(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BrandPageError {
    /// HTTP status carried by a [`BrandPageError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            BrandPageError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
