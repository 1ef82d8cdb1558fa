//! Shared defaults for the docsearch bootstrapper
//!
//! Values that the CLI, the config builder and the core components all need
//! to agree on live here to avoid magic numbers.

use std::time::Duration;

/// Default cluster host (the service name used by the compose setup)
pub const DEFAULT_HOST: &str = "opensearch";

/// Default REST port for OpenSearch / Elasticsearch
pub const DEFAULT_PORT: u16 = 9200;

/// Default user for HTTP basic auth
pub const DEFAULT_USERNAME: &str = "admin";

/// Default target index
pub const DEFAULT_INDEX: &str = "my_index";

/// Per-request timeout for every call to the cluster: 30 seconds
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long the readiness probe keeps polling before giving up: 2 minutes
///
/// A cold single-node cluster usually answers within 20-60s; the extra
/// headroom covers security plugin initialization on first boot.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(120);

/// Pause between readiness attempts
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Maximum number of hits returned by a search when no size is given
pub const DEFAULT_SEARCH_SIZE: usize = 10;

/// Longest value, in characters, indexed in a `.keyword` sub-field
pub const KEYWORD_IGNORE_ABOVE: u32 = 256;

/// Snippet length in characters (not bytes)
pub const SNIPPET_CHARS: usize = 50;

/// Keyword used by the demonstration query
pub const DEFAULT_KEYWORD: &str = "OpenSearch";

/// Content type filter used by the demonstration query
pub const DEFAULT_CONTENT_TYPE: &str = "article";

/// Default log file, appended to on every run
pub const DEFAULT_LOG_FILE: &str = "app.log";
