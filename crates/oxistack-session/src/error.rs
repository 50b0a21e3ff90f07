//! Error types for session and catalog collaborators.

/// Errors produced by session construction, authentication, and catalog
/// lookups.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The catalog has no endpoint matching the requested filter.
    ///
    /// During multi-candidate endpoint probing this is treated as "try the
    /// next candidate", never as a fatal condition.
    #[error("endpoint not found for service type {service_type}")]
    EndpointNotFound {
        /// Catalog service type that failed to resolve.
        service_type: String,
    },

    /// The auth plugin could not produce an access context.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Session construction failed.
    #[error("session construction failed: {0}")]
    Construction(String),

    /// Internal error from a collaborator implementation.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SessionError {
    /// Shorthand for [`SessionError::EndpointNotFound`].
    pub fn endpoint_not_found(service_type: impl Into<String>) -> Self {
        Self::EndpointNotFound {
            service_type: service_type.into(),
        }
    }

    /// Whether this error is the per-candidate "endpoint not found"
    /// condition.
    #[must_use]
    pub fn is_endpoint_not_found(&self) -> bool {
        matches!(self, Self::EndpointNotFound { .. })
    }
}

/// Convenience result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_classify_endpoint_not_found() {
        let err = SessionError::endpoint_not_found("volumev3");
        assert!(err.is_endpoint_not_found());
        assert_eq!(
            err.to_string(),
            "endpoint not found for service type volumev3"
        );
    }

    #[test]
    fn test_should_not_classify_other_errors_as_endpoint_not_found() {
        let err = SessionError::AuthFailed("bad token".to_owned());
        assert!(!err.is_endpoint_not_found());
    }
}
