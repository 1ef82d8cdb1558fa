//! Configuration module for cluster access
//!
//! This module provides the `ClusterConfig` struct and its type-safe builder.
//! A config is resolved once at process start and is immutable afterwards;
//! components receive it (or the client built from it) by reference.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ClusterConfigBuilder, Complete, WithHost};
pub use types::{ClusterConfig, Scheme};
