//! Flattened configuration mapping and key resolution.
//!
//! Cloud configuration arrives as a flat key/value bag. Per-service
//! overrides use keys of the form `<service_type>_<attribute>` (service
//! type lowercased, hyphens folded to underscores) with fallback to the
//! bare `<attribute>` key. Lookup order is always specific-then-generic,
//! never the reverse.

use std::collections::HashMap;

use serde_json::Value;

/// Normalize a config key: lowercase, hyphens to underscores.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('-', "_")
}

/// Compute the config key for a per-service attribute.
///
/// An empty service type returns the attribute unchanged; otherwise the
/// normalized service type is prefixed to the attribute.
///
/// ```
/// use oxistack_config::config::make_key;
///
/// assert_eq!(make_key("api_version", ""), "api_version");
/// assert_eq!(make_key("api_version", "Block-Storage"), "block_storage_api_version");
/// ```
#[must_use]
pub fn make_key(attribute: &str, service_type: &str) -> String {
    if service_type.is_empty() {
        attribute.to_owned()
    } else {
        format!("{}_{attribute}", normalize_key(service_type))
    }
}

/// A flat, key-normalized configuration mapping.
///
/// Keys are normalized on insert and on lookup, so `Block-Storage` and
/// `block_storage` address the same entry. Values are arbitrary JSON;
/// typed accessors coerce where the original loaders were loose about
/// types (booleans and numbers arriving as strings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigMap {
    inner: HashMap<String, Value>,
}

impl ConfigMap {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, normalizing the key. Returns the previous value
    /// when the normalized key was already present.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(normalize_key(key), value.into())
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(&normalize_key(key))
    }

    /// Whether the mapping contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&normalize_key(key))
    }

    /// Look up a string value.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a boolean value, coercing common string forms.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Some(matches!(
                s.as_str(),
                "1" | "true" | "yes" | "TRUE" | "YES" | "True"
            )),
            _ => None,
        }
    }

    /// Look up a numeric value, coercing numeric strings.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over normalized keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k.as_ref(), v);
        }
        map
    }
}

impl From<HashMap<String, Value>> for ConfigMap {
    fn from(inner: HashMap<String, Value>) -> Self {
        inner.into_iter().collect()
    }
}
