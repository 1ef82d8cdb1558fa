//! Index synchronizer: create-if-absent schema, index-if-absent documents
//!
//! Designed for a single writer bootstrapping an index. With the default
//! `InsertMode::CheckThenInsert`, the existence check and the insert are two
//! round trips, so a second concurrent writer can slip in between them and
//! cause a duplicate insert attempt for the same id. Deployments with
//! concurrent writers should use `InsertMode::AtomicCreate`, which relies on
//! the cluster's create-only write instead.
//!
//! Write failures are fail-fast: the first rejected insert aborts the rest of
//! the batch and is returned with the index and document id.

use serde::Serialize;

use crate::engine::{EngineError, EngineResult, Refresh, SearchBackend, WriteOp};
use crate::model::Document;
use crate::schema::IndexSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexOutcome {
    Created,
    AlreadyExisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// `exists` then `insert` for each missing id
    #[default]
    CheckThenInsert,
    /// Single create-only write per document; an id conflict counts as skipped
    AtomicCreate,
}

/// Outcome of one document sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Documents in the canonical set
    pub submitted: usize,
    /// Documents actually written by this pass
    pub inserted: usize,
    /// Ids found already present
    pub skipped: Vec<String>,
}

pub struct IndexSynchronizer<'a, B: ?Sized> {
    backend: &'a B,
    index: &'a str,
    mode: InsertMode,
    refresh: Refresh,
}

impl<'a, B: SearchBackend + ?Sized> IndexSynchronizer<'a, B> {
    pub fn new(backend: &'a B, index: &'a str) -> Self {
        Self {
            backend,
            index,
            mode: InsertMode::default(),
            // Read-after-write within the same run; fine for a small set
            refresh: Refresh::Immediate,
        }
    }

    #[must_use]
    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        self.mode = mode;
        self
    }

    /// Refresh policy for inserts (default `Refresh::Immediate`)
    #[must_use]
    pub fn with_refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = refresh;
        self
    }

    #[must_use]
    pub fn index(&self) -> &str {
        self.index
    }

    /// Create the index unless it already exists
    ///
    /// An existing index is left untouched, whatever its mapping.
    ///
    /// # Errors
    ///
    /// Any failure other than "already exists" is returned unchanged.
    pub async fn ensure_index(&self, schema: &IndexSchema) -> EngineResult<IndexOutcome> {
        match self.backend.create_index(self.index, schema).await {
            Ok(()) => {
                tracing::info!(index = self.index, "Index created");
                Ok(IndexOutcome::Created)
            }
            Err(e) if e.is_already_exists() => {
                tracing::info!(index = self.index, "Index already exists, leaving it as is");
                Ok(IndexOutcome::AlreadyExisted)
            }
            Err(e) => {
                tracing::error!(index = self.index, error = %e, "Index creation failed");
                Err(e)
            }
        }
    }

    /// Insert every document whose id is not yet present
    ///
    /// Documents are validated up front, so a malformed entry fails the call
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Validation errors, or the first failed existence check / insert.
    pub async fn ensure_documents(&self, documents: &[Document]) -> EngineResult<SyncReport> {
        for doc in documents {
            doc.validate()?;
        }

        tracing::info!(
            index = self.index,
            documents = documents.len(),
            mode = ?self.mode,
            "Synchronizing documents (fail-fast on write errors)"
        );

        let mut report = SyncReport {
            submitted: documents.len(),
            ..SyncReport::default()
        };

        for (position, doc) in documents.iter().enumerate() {
            let written = match self.mode {
                InsertMode::CheckThenInsert => self.check_then_insert(doc).await,
                InsertMode::AtomicCreate => self.create_only(doc).await,
            }
            .inspect_err(|e| {
                tracing::error!(
                    index = self.index,
                    id = doc.id(),
                    remaining = documents.len() - position - 1,
                    error = %e,
                    "Document write failed, aborting sync"
                );
            })?;

            if written {
                tracing::info!(index = self.index, id = doc.id(), title = %doc.title, "Added a document");
                report.inserted += 1;
            } else {
                tracing::debug!(index = self.index, id = doc.id(), "Document already exists, skipping");
                report.skipped.push(doc.id().to_string());
            }
        }

        tracing::info!(
            index = self.index,
            submitted = report.submitted,
            inserted = report.inserted,
            "Document sync finished"
        );
        Ok(report)
    }

    async fn check_then_insert(&self, doc: &Document) -> EngineResult<bool> {
        if self.backend.exists(self.index, doc.id()).await? {
            return Ok(false);
        }
        self.backend
            .insert(self.index, doc, self.refresh, WriteOp::Index)
            .await?;
        Ok(true)
    }

    async fn create_only(&self, doc: &Document) -> EngineResult<bool> {
        match self
            .backend
            .insert(self.index, doc, self.refresh, WriteOp::Create)
            .await
        {
            Ok(()) => Ok(true),
            Err(EngineError::Conflict { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
