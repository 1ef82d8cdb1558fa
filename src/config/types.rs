//! Core configuration types for cluster access

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::readiness::ProbeConfig;

/// Transport scheme used to reach the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved connection parameters for one cluster and one target index
///
/// **INVARIANT:** `username` and `password` are either both set or both
/// unset (enforced by the builder). Only the builder constructs it, so it is
/// serializable for diagnostics but not deserializable.
#[derive(Clone, Serialize)]
pub struct ClusterConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) scheme: Scheme,
    pub(crate) username: Option<String>,

    /// Never serialized; redacted in `Debug`
    #[serde(skip)]
    pub(crate) password: Option<String>,

    pub(crate) index_name: String,

    /// Verify the server certificate chain. Disabled by default because
    /// local clusters ship with the demo self-signed certificate.
    pub(crate) verify_certs: bool,

    /// Timeout applied to every individual request
    pub(crate) request_timeout: Duration,

    /// Readiness polling parameters
    pub(crate) probe: ProbeConfig,
}

impl fmt::Debug for ClusterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("index_name", &self.index_name)
            .field("verify_certs", &self.verify_certs)
            .field("request_timeout", &self.request_timeout)
            .field("probe", &self.probe)
            .finish()
    }
}
