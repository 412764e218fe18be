//! Live, multi-subscriber views over frequently-polled resources
//!
//! This crate sits above `toot-client` and keeps a small, fixed set of
//! resources (home timeline, the authenticated account) synchronized across
//! many concurrent observers without redundant network calls. Each resource
//! key owns the last fetched value and a set of bounded subscriber queues;
//! [`TootData::stream`] subscribes (current value first, then every update)
//! and [`TootData::refresh`] fetches now, coalescing concurrent calls for
//! the same key into a single request.
//!
//! Refresh failures are surfaced only to the refresh callers; passive
//! subscribers simply see no update for that round and keep the previous
//! value.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hub;
mod registry;

pub use hub::ResourceStream;
pub use registry::{Resource, ResourceKey, TimelineHome, TootData, VerifyCredentials};

use std::sync::Arc;
use toot_client::ClientError;

/// Error returned by [`TootData::refresh`]
///
/// Cheaply cloneable so a single failed fetch can be handed to every caller
/// coalesced onto it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshError {
    /// The underlying fetch failed
    #[error(transparent)]
    Client(Arc<ClientError>),

    /// The in-flight refresh this call coalesced onto was cancelled before
    /// it produced a result
    #[error("refresh was interrupted before completing")]
    Interrupted,
}

impl RefreshError {
    /// Get the underlying client error, when there is one
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            RefreshError::Client(err) => Some(err),
            RefreshError::Interrupted => None,
        }
    }
}

impl From<ClientError> for RefreshError {
    fn from(err: ClientError) -> Self {
        RefreshError::Client(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_error_is_cloneable() {
        let err: RefreshError = ClientError::InvalidRequest("nope".to_string()).into();
        let clone = err.clone();
        assert!(clone.client_error().is_some());
        assert!(clone.to_string().contains("nope"));
    }

    #[test]
    fn test_interrupted_has_no_client_error() {
        assert!(RefreshError::Interrupted.client_error().is_none());
    }
}
