//! Session, auth, and service catalog contracts for oxistack.
//!
//! The configuration core hands out preconfigured sessions but never
//! implements HTTP, authentication, or token handling itself. This crate
//! holds the seams: the traits a session/auth stack implements and the
//! plain types exchanged across them.
//!
//! # Modules
//!
//! - [`auth`] - Credential plugin and access context traits
//! - [`catalog`] - Service catalog trait, endpoint filters, and a static
//!   in-memory catalog
//! - [`error`] - Session error types
//! - [`session`] - Session and session factory traits
//! - [`tls`] - TLS verification and client certificate settings

pub mod auth;
pub mod catalog;
pub mod error;
pub mod session;
pub mod tls;

pub use auth::{Access, AuthPlugin};
pub use catalog::{CatalogEntry, EndpointFilter, ServiceCatalog, StaticServiceCatalog};
pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionFactory, SessionOptions};
pub use tls::{ClientCert, TlsVerify};
