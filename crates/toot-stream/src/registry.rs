//! Resource keys and the per-client stream registry
//!
//! [`TootData`] is owned by and scoped to one client value - there is no
//! process-global registry. It holds one hub per [`ResourceKey`]; each hub
//! has its own lock, so refreshing one resource never contends with
//! subscribers of another.

use async_trait::async_trait;
use std::fmt;
use toot_client::models::{Account, Status};
use toot_client::{ClientError, TootClient};

use crate::hub::{ResourceHub, ResourceStream};
use crate::RefreshError;

/// Identifier for one pollable, cacheable resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    /// The authenticated user's home timeline
    TimelineHome,
    /// The authenticated user's own account profile
    VerifyCredentials,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKey::TimelineHome => "timeline_home",
            ResourceKey::VerifyCredentials => "verify_credentials",
        };
        write!(f, "{name}")
    }
}

mod sealed {
    use super::TootData;
    use crate::hub::ResourceHub;

    /// Binds a resource marker to its typed hub inside [`TootData`]. The
    /// resource set is small and statically known, so this stays sealed.
    pub trait SelectHub {
        /// Decoded value type for this resource
        type Value: Clone + Send + Sync + 'static;

        /// Pick this resource's hub out of the registry
        fn select<'a>(&self, data: &'a TootData) -> &'a ResourceHub<Self::Value>;
    }
}

/// One of the statically known pollable resources
///
/// Modelled after a query abstraction: a resource knows its key, its decoded
/// value type, and how to fetch a complete replacement value through the
/// client. Implemented only by the marker types in this module.
#[async_trait]
pub trait Resource: sealed::SelectHub + Send + Sync {
    /// The key naming this resource
    fn key(&self) -> ResourceKey;

    /// Fetch the current value from the server
    async fn fetch(&self, client: &TootClient) -> Result<Self::Value, ClientError>;
}

/// Marker for the home timeline resource
#[derive(Debug, Clone, Copy)]
pub struct TimelineHome;

impl sealed::SelectHub for TimelineHome {
    type Value = Vec<Status>;

    fn select<'a>(&self, data: &'a TootData) -> &'a ResourceHub<Vec<Status>> {
        &data.timeline_home
    }
}

#[async_trait]
impl Resource for TimelineHome {
    fn key(&self) -> ResourceKey {
        ResourceKey::TimelineHome
    }

    async fn fetch(&self, client: &TootClient) -> Result<Vec<Status>, ClientError> {
        client.get_home_timeline().await
    }
}

/// Marker for the current-account profile resource
#[derive(Debug, Clone, Copy)]
pub struct VerifyCredentials;

impl sealed::SelectHub for VerifyCredentials {
    type Value = Account;

    fn select<'a>(&self, data: &'a TootData) -> &'a ResourceHub<Account> {
        &data.verify_credentials
    }
}

#[async_trait]
impl Resource for VerifyCredentials {
    fn key(&self) -> ResourceKey {
        ResourceKey::VerifyCredentials
    }

    async fn fetch(&self, client: &TootClient) -> Result<Account, ClientError> {
        client.verify_credentials().await
    }
}

/// Per-client registry of live resource views
///
/// # Examples
/// ```rust,no_run
/// use toot_client::{TootClient, TootClientConfig};
/// use toot_stream::{TimelineHome, TootData};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TootClient::new(TootClientConfig::new("https://mastodon.social"))?;
///     let data = TootData::new(client);
///
///     let mut timeline = data.stream(TimelineHome);
///     data.refresh(TimelineHome).await?;
///
///     while let Some(posts) = timeline.recv().await {
///         println!("got {} posts", posts.len());
///     }
///     Ok(())
/// }
/// ```
pub struct TootData {
    client: TootClient,
    timeline_home: ResourceHub<Vec<Status>>,
    verify_credentials: ResourceHub<Account>,
}

impl TootData {
    /// Create a registry bound to one client
    pub fn new(client: TootClient) -> Self {
        Self {
            client,
            timeline_home: ResourceHub::new(ResourceKey::TimelineHome),
            verify_credentials: ResourceHub::new(ResourceKey::VerifyCredentials),
        }
    }

    /// Get the client this registry fetches through
    pub fn client(&self) -> &TootClient {
        &self.client
    }

    /// Subscribe to a resource
    ///
    /// The stream produces the current value first (if one exists), then
    /// every value published by a successful refresh, until the stream is
    /// dropped or the registry is torn down.
    pub fn stream<R: Resource>(&self, resource: R) -> ResourceStream<R::Value> {
        resource.select(self).subscribe()
    }

    /// Fetch a resource now and publish the result to every subscriber
    ///
    /// Concurrent calls for the same key coalesce into a single network
    /// request; all callers receive the same outcome. A failed refresh is
    /// returned only to the refresh callers - subscribers keep the previous
    /// value and see no event for that round.
    pub async fn refresh<R: Resource>(&self, resource: R) -> Result<R::Value, RefreshError> {
        let hub = resource.select(self);
        hub.refresh(|| resource.fetch(&self.client)).await
    }
}
