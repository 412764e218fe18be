//! Mastodon-API-compatible client library
//!
//! This crate provides the request/response pipeline for talking to federated
//! social-network servers: typed request construction, multipart body
//! encoding, server-flavour-aware response decoding, and one-shot endpoint
//! helpers (media upload, instance info, timelines, credential verification).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accounts;
pub mod client;
pub mod flavour;
pub mod instance;
pub mod media;
pub mod models;
pub mod multipart;
pub mod request;
pub mod timelines;

pub use client::{HttpResponse, TootClient, TootClientConfig};
pub use flavour::Flavour;
pub use media::UploadMediaParams;
pub use request::{Body, HttpMethod, MultipartPart, RequestBuilder, RequestSpec};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error types for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request could not be constructed (bad URL, illegal path segment)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transport failure (connection, timeout, DNS) - surfaced as-is, never retried
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected schema
    #[error("Failed to decode response body: {source}")]
    Decode {
        /// Underlying schema mismatch
        source: serde_json::Error,
        /// Raw response bytes, kept for diagnostics
        body: Vec<u8>,
    },

    /// Malformed multipart part input
    #[error("Multipart encoding error: {0}")]
    Encoding(String),

    /// Server returned a non-success HTTP status
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as text
        body: String,
    },
}
