//! Cache settings pass-through contract.

use std::collections::HashMap;

use serde_json::Value;

/// Parent configuration provider supplying cache settings.
///
/// A [`CloudRegion`](crate::CloudRegion) optionally holds one of these
/// and forwards cache queries to it verbatim. Every accessor returns
/// `None` when the setting is not configured.
pub trait CacheConfigProvider: Send + Sync {
    /// Default cache entry expiration in seconds.
    fn get_cache_expiration_time(&self) -> Option<f64>;

    /// Filesystem path backing the cache, if file-based.
    fn get_cache_path(&self) -> Option<String>;

    /// Cache backend class identifier.
    fn get_cache_class(&self) -> Option<String>;

    /// Backend-specific cache arguments.
    fn get_cache_arguments(&self) -> Option<HashMap<String, Value>>;

    /// Per-resource-type expiration overrides.
    fn get_cache_expiration(&self) -> Option<HashMap<String, Value>>;
}
