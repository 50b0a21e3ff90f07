//! TLS verification and client certificate settings.
//!
//! These are the typed forms of the verify/cert arguments handed to a
//! [`SessionFactory`](crate::SessionFactory): verification is either on,
//! off, or pinned to a custom CA bundle, and a client certificate may
//! optionally carry a separate private key path.

use serde::{Deserialize, Serialize};

/// How server certificates should be verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsVerify {
    /// Verify against the system trust store.
    Enabled,
    /// Skip verification entirely.
    Disabled,
    /// Verify against a custom CA bundle at the given path.
    CaBundle(String),
}

impl TlsVerify {
    /// Whether any form of verification is performed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Build from a bare boolean flag.
    #[must_use]
    pub fn from_flag(verify: bool) -> Self {
        if verify { Self::Enabled } else { Self::Disabled }
    }
}

/// Client certificate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientCert {
    /// A combined certificate file.
    Cert(String),
    /// A certificate with a separate private key file.
    CertWithKey {
        /// Path to the certificate file.
        cert: String,
        /// Path to the private key file.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_report_ca_bundle_as_enabled() {
        assert!(TlsVerify::CaBundle("/ca.pem".to_owned()).is_enabled());
        assert!(TlsVerify::Enabled.is_enabled());
        assert!(!TlsVerify::Disabled.is_enabled());
    }

    #[test]
    fn test_should_build_from_flag() {
        assert_eq!(TlsVerify::from_flag(true), TlsVerify::Enabled);
        assert_eq!(TlsVerify::from_flag(false), TlsVerify::Disabled);
    }
}
