//! A session prepped with one service's resolved connection settings.

use std::fmt;
use std::sync::Arc;

use oxistack_session::{EndpointFilter, Session, SessionResult};

use crate::version::VersionArgs;

/// A session bound to a single service's resolved settings.
///
/// Produced by [`CloudRegion::get_session_client`](crate::CloudRegion::get_session_client);
/// downstream HTTP plumbing issues requests through the session against
/// the filter and version arguments carried here.
#[derive(Clone)]
pub struct ServiceClient {
    /// The shared authenticated session.
    pub session: Arc<dyn Session>,
    /// Resolved (possibly aliased) catalog service type.
    pub service_type: String,
    /// Resolved catalog service name, if configured.
    pub service_name: Option<String>,
    /// Resolved endpoint interface, if configured.
    pub interface: Option<String>,
    /// Region the client is scoped to, if any.
    pub region_name: Option<String>,
    /// Version constraints for the adapter layer.
    pub version_args: VersionArgs,
}

impl ServiceClient {
    /// The endpoint filter this client resolves requests against.
    #[must_use]
    pub fn endpoint_filter(&self) -> EndpointFilter {
        EndpointFilter::new(self.service_type.clone())
            .with_service_name(self.service_name.clone())
            .with_region_name(self.region_name.clone())
            .with_interface(self.interface.clone())
    }

    /// Resolve this client's endpoint from the session's catalog.
    pub fn get_endpoint(&self) -> SessionResult<String> {
        self.session.get_endpoint(&self.endpoint_filter())
    }
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service_type", &self.service_type)
            .field("service_name", &self.service_name)
            .field("interface", &self.interface)
            .field("region_name", &self.region_name)
            .field("version_args", &self.version_args)
            .finish_non_exhaustive()
    }
}
