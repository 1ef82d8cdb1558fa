//! One bootstrap run: probe, ensure index, ensure documents, query
//!
//! Each stage gates the next. An unreachable cluster stops the run before
//! any schema or document call is made.

use std::time::Duration;
use thiserror::Error;

use crate::config::ClusterConfig;
use crate::engine::{EngineError, Refresh, SearchBackend};
use crate::model::{Document, sample_documents};
use crate::query::{QueryEngine, SearchHit, SearchQuery};
use crate::readiness::{ConnectionState, ProbeConfig, ReadinessProbe};
use crate::schema::IndexSchema;
use crate::sync::{IndexOutcome, IndexSynchronizer, InsertMode, SyncReport};

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Readiness probe gave up; nothing else was attempted
    #[error("Cluster at {url} is not reachable after waiting {waited:?}")]
    Unreachable { url: String, waited: Duration },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Everything a run needs besides the backend and the query
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    /// Cluster address, used in diagnostics only
    pub cluster_url: String,
    pub index: String,
    pub probe: ProbeConfig,
    pub schema: IndexSchema,
    pub documents: Vec<Document>,
    pub insert_mode: InsertMode,
    pub refresh: Refresh,
}

impl BootstrapPlan {
    /// Canonical schema and document set for the configured index
    #[must_use]
    pub fn from_config(config: &ClusterConfig) -> Self {
        let cluster_url = config
            .base_url()
            .map_or_else(|_| format!("{}:{}", config.host(), config.port()), String::from);
        Self {
            cluster_url,
            index: config.index_name().to_string(),
            probe: *config.probe(),
            schema: IndexSchema::documents(),
            documents: sample_documents(),
            insert_mode: InsertMode::default(),
            refresh: Refresh::Immediate,
        }
    }

    #[must_use]
    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        self.insert_mode = mode;
        self
    }

    /// Refresh policy for document writes; the final query only sees the
    /// new documents with `Refresh::Immediate` or `Refresh::WaitFor`
    #[must_use]
    pub fn with_refresh(mut self, refresh: Refresh) -> Self {
        self.refresh = refresh;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub index: IndexOutcome,
    pub sync: SyncReport,
    pub hits: Vec<SearchHit>,
}

/// Run probe → sync → one query
///
/// # Errors
///
/// `BootstrapError::Unreachable` when the probe times out; otherwise the
/// first engine error from schema creation, document sync or search.
pub async fn run_bootstrap<B: SearchBackend + ?Sized>(
    backend: &B,
    plan: &BootstrapPlan,
    query: &SearchQuery,
) -> Result<BootstrapReport, BootstrapError> {
    let probe = ReadinessProbe::new(backend, plan.probe);
    if probe.wait().await == ConnectionState::Unreachable {
        return Err(BootstrapError::Unreachable {
            url: plan.cluster_url.clone(),
            waited: plan.probe.timeout,
        });
    }

    let synchronizer = IndexSynchronizer::new(backend, &plan.index)
        .with_insert_mode(plan.insert_mode)
        .with_refresh(plan.refresh);
    let index = synchronizer.ensure_index(&plan.schema).await?;
    let sync = synchronizer.ensure_documents(&plan.documents).await?;

    let hits = QueryEngine::new(backend, &plan.index).run(query).await?;

    Ok(BootstrapReport { index, sync, hits })
}
