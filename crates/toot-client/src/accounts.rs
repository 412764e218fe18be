//! Account endpoints

use crate::models::Account;
use crate::request::HttpMethod;
use crate::{Result, TootClient};

impl TootClient {
    /// Verify the configured access token and fetch the owning account
    pub async fn verify_credentials(&self) -> Result<Account> {
        let spec = self
            .request(HttpMethod::Get)
            .path(["api", "v1", "accounts", "verify_credentials"])
            .build()?;
        self.fetch(spec).await
    }
}
