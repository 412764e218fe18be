//! Instance information endpoint

use crate::models::Instance;
use crate::request::HttpMethod;
use crate::{Result, TootClient};

impl TootClient {
    /// Obtain general information about the server
    pub async fn get_instance_info(&self) -> Result<Instance> {
        let spec = self
            .request(HttpMethod::Get)
            .path(["api", "v1", "instance"])
            .build()?;
        self.fetch(spec).await
    }
}
