use crate::api::DiscogsClient;
use crate::error::Result;
use crate::models::SearchResponse;

impl DiscogsClient {
    /// Search releases
    /// GET /database/search?q={term}&type=release&page={page}&per_page={per_page}
    pub async fn search(&self, term: &str, page: u32, per_page: u32) -> Result<SearchResponse> {
        let query = [
            ("q", term.to_string()),
            ("type", "release".to_string()),
            ("page", page.max(1).to_string()),
            ("per_page", per_page.max(1).to_string()),
        ];
        let response = self.get("/database/search", &query).await?;
        let result: SearchResponse = self.handle_response(response).await?;
        log::info!(
            "Search '{}' page {}/{} returned {} results",
            term,
            result.pagination.page,
            result.pagination.pages,
            result.results.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
