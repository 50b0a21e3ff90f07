//! Service catalog contract and endpoint filters.
//!
//! The catalog is a directory, provided by the auth system, mapping
//! service types to their available endpoints per region and interface.
//! This module defines the [`ServiceCatalog`] trait along with
//! [`StaticServiceCatalog`], an in-memory implementation for testing and
//! development.

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Criteria for selecting one endpoint out of a service catalog.
///
/// `service_type` is mandatory; the remaining fields narrow the match
/// only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointFilter {
    /// Canonical catalog service type (e.g. `compute`, `volumev3`).
    pub service_type: String,
    /// Catalog service name, when the deployment registers several
    /// services of the same type.
    pub service_name: Option<String>,
    /// Region the endpoint must belong to.
    pub region_name: Option<String>,
    /// Endpoint visibility class (e.g. `public`, `internal`, `admin`).
    pub interface: Option<String>,
}

impl EndpointFilter {
    /// Create a filter matching any endpoint of the given service type.
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Self::default()
        }
    }

    /// Restrict the filter to a service name.
    #[must_use]
    pub fn with_service_name(mut self, service_name: Option<String>) -> Self {
        self.service_name = service_name;
        self
    }

    /// Restrict the filter to a region.
    #[must_use]
    pub fn with_region_name(mut self, region_name: Option<String>) -> Self {
        self.region_name = region_name;
        self
    }

    /// Restrict the filter to an endpoint interface.
    #[must_use]
    pub fn with_interface(mut self, interface: Option<String>) -> Self {
        self.interface = interface;
        self
    }
}

/// Trait for resolving service endpoints out of a catalog.
///
/// Implementations may be backed by a live identity service, a cached
/// token payload, or a static table.
pub trait ServiceCatalog: Send + Sync {
    /// Resolve the endpoint URL matching the given filter.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EndpointNotFound`] when no catalog entry
    /// matches the filter.
    fn endpoint_for(&self, filter: &EndpointFilter) -> SessionResult<String>;
}

/// One endpoint registration inside a [`StaticServiceCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog service type.
    pub service_type: String,
    /// Catalog service name, if registered.
    pub service_name: Option<String>,
    /// Region the endpoint belongs to, if registered.
    pub region_name: Option<String>,
    /// Endpoint interface, if registered.
    pub interface: Option<String>,
    /// The endpoint URL.
    pub url: String,
}

impl CatalogEntry {
    /// Create an entry matching any region/interface/name filter.
    pub fn new(service_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            service_name: None,
            region_name: None,
            interface: None,
            url: url.into(),
        }
    }

    fn matches(&self, filter: &EndpointFilter) -> bool {
        if self.service_type != filter.service_type {
            return false;
        }
        field_matches(self.service_name.as_deref(), filter.service_name.as_deref())
            && field_matches(self.region_name.as_deref(), filter.region_name.as_deref())
            && field_matches(self.interface.as_deref(), filter.interface.as_deref())
    }
}

/// An optional entry field matches when either side leaves it open.
fn field_matches(entry: Option<&str>, filter: Option<&str>) -> bool {
    match (entry, filter) {
        (Some(e), Some(f)) => e == f,
        _ => true,
    }
}

/// An in-memory service catalog backed by a list of entries.
///
/// Suitable for tests and development. First matching entry wins, so
/// registration order matters when entries overlap.
#[derive(Debug, Clone, Default)]
pub struct StaticServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticServiceCatalog {
    /// Create a catalog from an iterable of entries.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl ServiceCatalog for StaticServiceCatalog {
    fn endpoint_for(&self, filter: &EndpointFilter) -> SessionResult<String> {
        self.entries
            .iter()
            .find(|entry| entry.matches(filter))
            .map(|entry| entry.url.clone())
            .ok_or_else(|| SessionError::endpoint_not_found(filter.service_type.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_endpoint_by_service_type() {
        let catalog = StaticServiceCatalog::new(vec![CatalogEntry::new(
            "compute",
            "https://compute.example.com/v2.1",
        )]);

        let url = catalog.endpoint_for(&EndpointFilter::new("compute")).unwrap();
        assert_eq!(url, "https://compute.example.com/v2.1");
    }

    #[test]
    fn test_should_return_endpoint_not_found_for_missing_service() {
        let catalog = StaticServiceCatalog::default();

        let err = catalog
            .endpoint_for(&EndpointFilter::new("volumev3"))
            .unwrap_err();
        assert!(err.is_endpoint_not_found());
    }

    #[test]
    fn test_should_narrow_by_region_and_interface() {
        let mut east = CatalogEntry::new("compute", "https://east.example.com");
        east.region_name = Some("east".to_owned());
        east.interface = Some("public".to_owned());
        let mut west = CatalogEntry::new("compute", "https://west.example.com");
        west.region_name = Some("west".to_owned());
        west.interface = Some("public".to_owned());
        let catalog = StaticServiceCatalog::new(vec![east, west]);

        let filter = EndpointFilter::new("compute")
            .with_region_name(Some("west".to_owned()))
            .with_interface(Some("public".to_owned()));
        assert_eq!(
            catalog.endpoint_for(&filter).unwrap(),
            "https://west.example.com"
        );
    }

    #[test]
    fn test_should_match_open_filter_fields() {
        let mut entry = CatalogEntry::new("network", "https://net.example.com");
        entry.region_name = Some("east".to_owned());
        let catalog = StaticServiceCatalog::new(vec![entry]);

        // Filter leaves region open, entry pins it: still a match.
        assert!(catalog.endpoint_for(&EndpointFilter::new("network")).is_ok());
    }
}
