use crate::api::DiscogsClient;
use crate::error::Result;
use crate::models::Release;

impl DiscogsClient {
    /// Get a full release record
    /// GET /releases/{id}
    pub async fn release(&self, id: u64) -> Result<Release> {
        let response = self.get(&format!("/releases/{}", id), &[]).await?;
        self.handle_response(response).await
    }
}
