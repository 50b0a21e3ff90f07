//! Session and session factory contracts.
//!
//! A session is a preconfigured HTTP client carrying auth, TLS, and
//! timeout settings. This crate does not implement one; it defines the
//! interface the configuration core programs against, so that any HTTP
//! stack can be plugged in behind a [`SessionFactory`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::AuthPlugin;
use crate::catalog::EndpointFilter;
use crate::error::SessionResult;
use crate::tls::{ClientCert, TlsVerify};

/// Arguments handed to a [`SessionFactory`] when constructing a session.
#[derive(Clone)]
pub struct SessionOptions {
    /// Credential plugin the session authenticates with.
    pub auth: Arc<dyn AuthPlugin>,
    /// Server certificate verification mode.
    pub verify: TlsVerify,
    /// Optional client certificate.
    pub cert: Option<ClientCert>,
    /// Optional per-request timeout.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("auth", &"<auth plugin>")
            .field("verify", &self.verify)
            .field("cert", &self.cert)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A session-like object that can issue HTTP requests against catalog
/// endpoints.
///
/// The user-agent and app-info methods are optional capabilities: session
/// implementations without support simply keep the default no-op bodies.
pub trait Session: Send + Sync + std::fmt::Debug {
    /// Resolve an endpoint from the service catalog backing this session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EndpointNotFound`](crate::SessionError::EndpointNotFound)
    /// when the catalog has no entry matching the filter.
    fn get_endpoint(&self, filter: &EndpointFilter) -> SessionResult<String>;

    /// The auth URL this session was built against, when known.
    fn auth_url(&self) -> Option<String> {
        None
    }

    /// Append a `(name, version)` pair to the session user agent.
    fn append_user_agent(&self, _name: &str, _version: &str) {}

    /// Record the calling application's name and version.
    fn set_app_info(&self, _name: Option<&str>, _version: Option<&str>) {}
}

/// Constructor for [`Session`] objects.
///
/// Injected into the configuration core so session construction stays
/// out of its hands; implementations decide blocking behaviour and the
/// underlying HTTP stack.
pub trait SessionFactory: Send + Sync {
    /// Build a session from the given options.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be constructed, for
    /// example because the credential plugin is unusable.
    fn create_session(&self, options: SessionOptions) -> SessionResult<Arc<dyn Session>>;
}
