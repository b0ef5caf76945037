// Click statistics endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{SortBy, StatsListResponse, StatsResponse};

impl ApiClient {
    /// `GET /stats/?top=&sort_by=` -- server-ranked top-N list.
    pub async fn top_stats(&self, top: u32, sort_by: SortBy) -> Result<StatsListResponse, Error> {
        let url = self.endpoint(&["stats", ""])?;
        let params = [("top", top.to_string()), ("sort_by", sort_by.to_string())];
        self.get(url, &params).await
    }

    /// `GET /stats/{short_id}`
    pub async fn link_stats(&self, short_id: &str) -> Result<StatsResponse, Error> {
        let url = self.endpoint(&["stats", short_id])?;
        self.get(url, &[]).await
    }
}
