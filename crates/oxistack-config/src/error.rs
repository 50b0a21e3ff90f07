//! Error types for the configuration core.

use oxistack_session::SessionError;

/// Errors raised while resolving per-region configuration.
///
/// Absence of a config key is never an error in this crate; accessors
/// return `None` for unset keys.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Session construction was attempted without a usable auth plugin.
    #[error("Problem with auth parameters")]
    AuthParameters,

    /// Session construction was attempted without an injected factory
    /// and without a pre-supplied session.
    #[error("no session factory configured")]
    MissingSessionFactory,

    /// The `networks` config entry does not deserialize into network
    /// records.
    #[error("invalid networks configuration: {0}")]
    InvalidNetworks(#[source] serde_json::Error),

    /// Error from a session, auth, or catalog collaborator.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
