//! Type-safe builder for `ClusterConfig` using the typestate pattern
//!
//! The host and the index name are required; every other field has a
//! default taken from `utils::constants`. `build()` is only reachable once
//! both required fields are set.

use anyhow::{Result, bail};
use std::marker::PhantomData;
use std::time::Duration;

use super::types::{ClusterConfig, Scheme};
use crate::readiness::ProbeConfig;
use crate::utils::{
    DEFAULT_POLL_INTERVAL, DEFAULT_PORT, DEFAULT_READY_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
};

// Type states for the builder
pub struct WithHost;
pub struct Complete;

pub struct ClusterConfigBuilder<State = ()> {
    pub(crate) host: Option<String>,
    pub(crate) port: u16,
    pub(crate) scheme: Scheme,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) index_name: Option<String>,
    pub(crate) verify_certs: bool,
    pub(crate) request_timeout: Duration,
    pub(crate) ready_timeout: Duration,
    pub(crate) poll_interval: Duration,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ClusterConfigBuilder<()> {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            scheme: Scheme::Https,
            username: None,
            password: None,
            index_name: None,
            verify_certs: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            _phantom: PhantomData,
        }
    }
}

impl ClusterConfig {
    /// Create a builder for configuring a `ClusterConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ClusterConfigBuilder<()> {
        ClusterConfigBuilder::default()
    }
}

impl<State> ClusterConfigBuilder<State> {
    fn transition<Next>(self) -> ClusterConfigBuilder<Next> {
        ClusterConfigBuilder {
            host: self.host,
            port: self.port,
            scheme: self.scheme,
            username: self.username,
            password: self.password,
            index_name: self.index_name,
            verify_certs: self.verify_certs,
            request_timeout: self.request_timeout,
            ready_timeout: self.ready_timeout,
            poll_interval: self.poll_interval,
            _phantom: PhantomData,
        }
    }
}

impl ClusterConfigBuilder<()> {
    pub fn host(mut self, host: impl Into<String>) -> ClusterConfigBuilder<WithHost> {
        self.host = Some(host.into().trim().to_string());
        self.transition()
    }
}

impl ClusterConfigBuilder<WithHost> {
    pub fn index_name(mut self, index: impl Into<String>) -> ClusterConfigBuilder<Complete> {
        self.index_name = Some(index.into().trim().to_string());
        self.transition()
    }
}

impl ClusterConfigBuilder<Complete> {
    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// Fails on an empty host or index name, port 0, a zero poll interval,
    /// or when only one half of the credentials was supplied.
    pub fn build(self) -> Result<ClusterConfig> {
        let host = self.host.unwrap_or_default();
        if host.is_empty() {
            bail!("Cluster host must not be empty");
        }

        if self.port == 0 {
            bail!("Cluster port must be in 1..=65535");
        }

        let index_name = self.index_name.unwrap_or_default();
        if index_name.is_empty() {
            bail!("Index name must not be empty");
        }
        // OpenSearch rejects upper-case index names with a 400 that is easy
        // to mistake for a mapping problem, so catch it here.
        if index_name.chars().any(char::is_uppercase) {
            bail!("Index name '{index_name}' must be lowercase");
        }

        match (&self.username, &self.password) {
            (Some(_), None) => bail!("Username given without a password"),
            (None, Some(_)) => bail!("Password given without a username"),
            _ => {}
        }

        if self.poll_interval.is_zero() {
            bail!("Readiness poll interval must be greater than zero");
        }

        Ok(ClusterConfig {
            host,
            port: self.port,
            scheme: self.scheme,
            username: self.username,
            password: self.password,
            index_name,
            verify_certs: self.verify_certs,
            request_timeout: self.request_timeout,
            probe: ProbeConfig::new(self.ready_timeout, self.poll_interval),
        })
    }
}
