//! Search execution against a `SearchBackend`

use super::builder::{SearchQuery, SearchQueryBuilder};
use super::results::SearchHit;
use crate::engine::{EngineResult, SearchBackend};
use crate::log_engine_operation;

pub struct QueryEngine<'a, B: ?Sized> {
    backend: &'a B,
    index: &'a str,
}

impl<'a, B: SearchBackend + ?Sized> QueryEngine<'a, B> {
    pub fn new(backend: &'a B, index: &'a str) -> Self {
        Self { backend, index }
    }

    /// Search `keyword` in title and content, optionally filtered by
    /// content type, returning at most `size` hits
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` for a blank keyword (no request is sent),
    /// otherwise whatever the search call returns. Zero hits is `Ok(vec![])`.
    pub async fn search(
        &self,
        keyword: &str,
        content_type: Option<&str>,
        size: usize,
    ) -> EngineResult<Vec<SearchHit>> {
        SearchQueryBuilder::new(keyword)
            .content_type(content_type)
            .size(size)
            .execute(self)
            .await
    }

    /// Run an already validated query
    ///
    /// # Errors
    ///
    /// Returns the search call's error unchanged.
    pub async fn run(&self, query: &SearchQuery) -> EngineResult<Vec<SearchHit>> {
        let start = std::time::Instant::now();
        let body = query.to_request_body();

        let response = log_engine_operation!(
            self.backend.search(self.index, &body).await,
            "search",
            self.index
        )?;

        let hits: Vec<SearchHit> = response.into_hits().into_iter().map(SearchHit::from).collect();

        if hits.is_empty() {
            tracing::info!(
                keyword = query.keyword(),
                content_type = query.content_type().map(|ct| ct.as_str()),
                "Nothing was found for the query"
            );
        } else {
            tracing::info!(
                keyword = query.keyword(),
                content_type = query.content_type().map(|ct| ct.as_str()),
                results_count = hits.len(),
                duration_ms = start.elapsed().as_millis(),
                "Search completed successfully"
            );
        }

        Ok(hits)
    }
}
