//! Query builder for constructing searches with a fluent interface

use serde::Serialize;

use super::execution::QueryEngine;
use super::results::SearchHit;
use crate::engine::{EngineError, EngineResult, SearchBackend};
use crate::model::ContentType;
use crate::utils::DEFAULT_SEARCH_SIZE;

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    keyword: String,
    content_type: Option<ContentType>,
    size: usize,
}

impl SearchQuery {
    /// Shorthand for `SearchQueryBuilder::new(keyword).build()`
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` for a blank keyword.
    pub fn new(keyword: impl Into<String>) -> EngineResult<Self> {
        SearchQueryBuilder::new(keyword).build()
    }

    #[must_use]
    pub fn builder(keyword: impl Into<String>) -> SearchQueryBuilder {
        SearchQueryBuilder::new(keyword)
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Search query builder with fluent interface
pub struct SearchQueryBuilder {
    keyword: String,
    content_type: Option<String>,
    size: usize,
}

impl SearchQueryBuilder {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            content_type: None,
            size: DEFAULT_SEARCH_SIZE,
        }
    }

    /// Restrict hits to one content type; `None` or a blank label means
    /// no filter
    #[must_use]
    pub fn content_type<S: Into<String>>(mut self, content_type: Option<S>) -> Self {
        self.content_type = content_type.map(Into::into);
        self
    }

    /// Set the maximum number of hits to return
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Validate into a `SearchQuery`
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` when the keyword is blank or size is zero.
    /// A blank keyword is never widened into a match-all query.
    pub fn build(self) -> EngineResult<SearchQuery> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(EngineError::Validation(
                "Search keyword must not be empty".to_string(),
            ));
        }
        if self.size == 0 {
            return Err(EngineError::Validation(
                "Search size must be at least 1".to_string(),
            ));
        }

        let content_type = self
            .content_type
            .map(|ct| ct.trim().to_string())
            .filter(|ct| !ct.is_empty())
            .map(ContentType::new);

        Ok(SearchQuery {
            keyword: keyword.to_string(),
            content_type,
            size: self.size,
        })
    }

    /// Validate and run against `engine`
    ///
    /// # Errors
    ///
    /// Validation errors, or whatever the search call returns.
    pub async fn execute<B: SearchBackend + ?Sized>(
        self,
        engine: &QueryEngine<'_, B>,
    ) -> EngineResult<Vec<SearchHit>> {
        let query = self.build()?;
        engine.run(&query).await
    }
}
