//! The four primitives the core needs from a search cluster
//!
//! `OpenSearchClient` implements this over REST; tests plug in an in-memory
//! implementation. The trait returns boxed futures so it stays object-safe.

use futures::future::BoxFuture;
use serde_json::Value;

use super::errors::EngineResult;
use super::response::SearchResponse;
use crate::model::Document;
use crate::schema::IndexSchema;

/// When a written document becomes visible to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Refresh the affected shards before acknowledging the write
    Immediate,
    /// Acknowledge after the next scheduled refresh
    WaitFor,
    /// Acknowledge immediately; visible after the next refresh
    None,
}

impl Refresh {
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Refresh::Immediate => "true",
            Refresh::WaitFor => "wait_for",
            Refresh::None => "false",
        }
    }
}

/// How a document write treats an id that is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    /// Create or overwrite
    Index,
    /// Create only; an existing id fails with `EngineError::Conflict`
    Create,
}

/// Search cluster client abstraction
pub trait SearchBackend: Send + Sync {
    /// Health check. Transport failures surface as `EngineError::Connectivity`
    /// rather than `Ok(false)`.
    fn ping(&self) -> BoxFuture<'_, EngineResult<bool>>;

    /// Create `index` with the given schema. An existing index fails with
    /// `EngineError::AlreadyExists`.
    fn create_index<'a>(
        &'a self,
        index: &'a str,
        schema: &'a IndexSchema,
    ) -> BoxFuture<'a, EngineResult<()>>;

    /// Whether a document with `id` is stored in `index`
    fn exists<'a>(&'a self, index: &'a str, id: &'a str) -> BoxFuture<'a, EngineResult<bool>>;

    /// Write one document under its own id
    fn insert<'a>(
        &'a self,
        index: &'a str,
        document: &'a Document,
        refresh: Refresh,
        op: WriteOp,
    ) -> BoxFuture<'a, EngineResult<()>>;

    /// Run a structured search request (query DSL body)
    fn search<'a>(
        &'a self,
        index: &'a str,
        request: &'a Value,
    ) -> BoxFuture<'a, EngineResult<SearchResponse>>;
}
