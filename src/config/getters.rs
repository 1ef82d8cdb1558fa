//! Getter methods for `ClusterConfig`

use std::time::Duration;
use url::Url;

use super::types::{ClusterConfig, Scheme};
use crate::readiness::ProbeConfig;

impl ClusterConfig {
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    #[must_use]
    pub fn verify_certs(&self) -> bool {
        self.verify_certs
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }

    /// Basic-auth pair, if configured
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    /// Root URL of the cluster, always ending in `/`
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a valid URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        // IPv6 literals need brackets in the authority
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Url::parse(&format!("{}://{}:{}/", self.scheme, host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_renders_scheme_host_port() {
        let config = ClusterConfig::builder()
            .host("opensearch")
            .index_name("my_index")
            .scheme(Scheme::Http)
            .port(9201)
            .build()
            .expect("valid config");
        assert_eq!(
            config.base_url().expect("url").as_str(),
            "http://opensearch:9201/"
        );
    }

    #[test]
    fn base_url_brackets_ipv6() {
        let config = ClusterConfig::builder()
            .host("::1")
            .index_name("my_index")
            .build()
            .expect("valid config");
        assert_eq!(config.base_url().expect("url").as_str(), "https://[::1]:9200/");
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClusterConfig::builder()
            .host("h")
            .index_name("i")
            .credentials("admin", "hunter2")
            .build()
            .expect("valid config");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
