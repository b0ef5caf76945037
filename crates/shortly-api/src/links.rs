// Link endpoints: list, create, deactivate.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{CreateLinkRequest, LinkListResponse, LinkQuery, LinkResponse};

impl ApiClient {
    /// `GET /links/?page=&page_size=[&is_valid=][&is_active=]`
    pub async fn list_links(&self, query: &LinkQuery) -> Result<LinkListResponse, Error> {
        let url = self.endpoint(&["links", ""])?;
        self.get(url, &query.to_params()).await
    }

    /// `POST /links/` with `{orig_url, expire_seconds?}`.
    pub async fn create_link(
        &self,
        orig_url: &str,
        expire_seconds: Option<u64>,
    ) -> Result<LinkResponse, Error> {
        let url = self.endpoint(&["links", ""])?;
        let body = CreateLinkRequest {
            orig_url,
            expire_seconds,
        };
        self.post(url, &body).await
    }

    /// `PATCH /links/{short_id}/deactivate`
    pub async fn deactivate_link(&self, short_id: &str) -> Result<LinkResponse, Error> {
        let url = self.endpoint(&["links", short_id, "deactivate"])?;
        self.patch(url).await
    }
}
