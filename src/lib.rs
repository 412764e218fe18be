//! Tootkit - a client SDK for Mastodon-API-compatible servers
//!
//! Facade over the workspace crates: `toot-client` (request pipeline,
//! endpoint helpers, models) and `toot-stream` (live multi-subscriber
//! resource views).

#![warn(missing_docs)]

pub use toot_client::{
    models, ClientError, Flavour, TootClient, TootClientConfig, UploadMediaParams,
};
pub use toot_stream::{
    RefreshError, Resource, ResourceKey, ResourceStream, TimelineHome, TootData,
    VerifyCredentials,
};
