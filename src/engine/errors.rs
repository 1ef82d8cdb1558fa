//! Error types for cluster operations
//!
//! Every variant carries enough context (operation, index, document id) to
//! diagnose a failure from the log line alone.

use thiserror::Error;

/// Result type alias for cluster operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error types for cluster operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Cluster unreachable or transport failure
    #[error("{operation}: cluster unreachable: {message}")]
    Connectivity {
        operation: &'static str,
        message: String,
    },

    /// Index creation hit an existing index (benign for idempotent setup)
    #[error("Index '{index}' already exists")]
    AlreadyExists { index: String },

    /// Malformed document or query input, rejected before any request
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Cluster refused the request for a reason other than "already exists"
    #[error("{operation} on '{target}' rejected with HTTP {status}: {reason}")]
    Rejected {
        operation: &'static str,
        target: String,
        status: u16,
        reason: String,
    },

    /// Create-only write found the id already taken
    #[error("Document '{id}' already exists in index '{index}'")]
    Conflict { index: String, id: String },

    /// Response body did not have the expected shape
    #[error("{operation}: malformed response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl EngineError {
    /// Check if error is transient and worth polling again
    ///
    /// Only connectivity failures qualify; rejections and validation errors
    /// will fail the same way on every attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Connectivity { .. })
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, EngineError::AlreadyExists { .. })
    }

    pub(crate) fn connectivity(operation: &'static str, error: impl std::fmt::Display) -> Self {
        EngineError::Connectivity {
            operation,
            message: error.to_string(),
        }
    }
}

/// Log the outcome and latency of a cluster call, passing the result through
#[macro_export]
macro_rules! log_engine_operation {
    ($op:expr, $operation:expr, $target:expr) => {{
        let start = std::time::Instant::now();
        let result = $op;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    operation = $operation,
                    target = %$target,
                    duration_ms = duration.as_millis(),
                    "Cluster operation completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation = $operation,
                    target = %$target,
                    duration_ms = duration.as_millis(),
                    error = %e,
                    "Cluster operation failed"
                );
            }
        }

        result
    }};
}
