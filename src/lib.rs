pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod query;
pub mod readiness;
pub mod schema;
pub mod sync;
pub mod utils;

pub use bootstrap::{BootstrapError, BootstrapPlan, BootstrapReport, run_bootstrap};
pub use config::{ClusterConfig, Scheme};
pub use engine::{EngineError, EngineResult, OpenSearchClient, Refresh, SearchBackend, WriteOp};
pub use model::{ContentType, Document, sample_documents};
pub use query::{QueryEngine, SearchHit, SearchQuery, SearchQueryBuilder};
pub use readiness::{ConnectionState, ProbeConfig, ReadinessProbe, wait_until_ready};
pub use schema::{FieldMapping, IndexSchema, IndexSettings, KeywordSubfield};
pub use sync::{IndexOutcome, IndexSynchronizer, InsertMode, SyncReport};
