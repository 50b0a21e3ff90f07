//! Per-region cloud configuration resolution.
//!
//! A cloud deployment exposes many services across one or more regions,
//! each with its own endpoints, API versions, and interface choices.
//! [`CloudRegion`] holds the flattened configuration for one region and
//! resolves the settings downstream clients need: config keys scoped by
//! service type with generic fallback, legacy service-type aliasing,
//! version-argument translation, TLS settings, lazy session construction,
//! and catalog endpoint discovery.
//!
//! # Modules
//!
//! - [`cache`] - Cache settings pass-through contract
//! - [`client`] - Per-service prepped client
//! - [`config`] - Flat config mapping and key resolution
//! - [`error`] - Configuration error types
//! - [`network`] - Network records and classification helpers
//! - [`region`] - The per-region configuration core
//! - [`version`] - Version-argument translation and volume probing order

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod region;
pub mod version;

pub use cache::CacheConfigProvider;
pub use client::ServiceClient;
pub use config::{ConfigMap, make_key, normalize_key};
pub use error::{ConfigError, ConfigResult};
pub use network::NetworkConfig;
pub use region::CloudRegion;
pub use version::{VersionArgs, version_args, volume_candidates};
