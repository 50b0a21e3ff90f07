//! Auth plugin and access context contracts.

use std::sync::Arc;

use crate::catalog::ServiceCatalog;
use crate::error::SessionResult;
use crate::session::Session;

/// Credential plugin that can exchange a session for an access context.
///
/// The access context carries the token state and the service catalog
/// discovered during authentication.
pub trait AuthPlugin: Send + Sync {
    /// Resolve the current access context using the given session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AuthFailed`](crate::SessionError::AuthFailed)
    /// when the credentials are rejected or the token cannot be obtained.
    fn get_access(&self, session: &dyn Session) -> SessionResult<Arc<dyn Access>>;
}

/// The result of a successful authentication.
pub trait Access: Send + Sync {
    /// The service catalog carried by this access context.
    fn service_catalog(&self) -> Arc<dyn ServiceCatalog>;
}
