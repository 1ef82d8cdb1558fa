//! Cluster access: the primitive operations the core relies on, their
//! error taxonomy, and the REST client that implements them.

pub mod backend;
pub mod client;
pub mod errors;
pub mod response;

pub use backend::{Refresh, SearchBackend, WriteOp};
pub use client::OpenSearchClient;
pub use errors::{EngineError, EngineResult};
pub use response::{RawHit, SearchResponse};
