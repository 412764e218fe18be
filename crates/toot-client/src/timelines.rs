//! Timeline endpoints
//!
//! Each fetch returns the full page as a complete replacement value; cursor
//! pagination is a caller concern.

use crate::models::Status;
use crate::request::HttpMethod;
use crate::{Result, TootClient};

impl TootClient {
    /// Fetch the authenticated user's home timeline
    pub async fn get_home_timeline(&self) -> Result<Vec<Status>> {
        let spec = self
            .request(HttpMethod::Get)
            .path(["api", "v1", "timelines", "home"])
            .build()?;
        self.fetch(spec).await
    }
}
