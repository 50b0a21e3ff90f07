//! Per-region cloud configuration resolution.
//!
//! [`CloudRegion`] wraps a flattened config mapping plus lazily-built
//! session state and answers the questions downstream HTTP-client
//! construction asks: which endpoint, which API version, which
//! interface, which session.

use std::sync::{Arc, Once, OnceLock};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use oxistack_session::{
    AuthPlugin, ClientCert, EndpointFilter, ServiceCatalog, Session, SessionFactory,
    SessionOptions, TlsVerify,
};

use crate::cache::CacheConfigProvider;
use crate::client::ServiceClient;
use crate::config::{ConfigMap, make_key};
use crate::error::{ConfigError, ConfigResult};
use crate::network::{self, NetworkConfig};
use crate::version::{VersionArgs, version_args, volume_candidates};

/// Client identifier appended to session user agents.
const CLIENT_NAME: &str = "oxistack";

/// Emit the insecure-session warning only once per process. Repeated
/// regions with verification disabled would otherwise flood the log.
fn warn_insecure_once() {
    static INSECURE_WARNING: Once = Once::new();
    INSECURE_WARNING.call_once(|| {
        warn!("TLS verification is disabled; server certificates will not be checked");
    });
}

/// The configuration for one region of a cloud.
///
/// Immutable after construction apart from the session slot, which is
/// populated exactly once on first [`get_session`](Self::get_session).
/// Identity is `(name, region_name)`; two regions compare equal when
/// identity and config match.
pub struct CloudRegion {
    name: String,
    region_name: Option<String>,
    config: ConfigMap,
    force_ipv4: bool,
    auth: Option<Arc<dyn AuthPlugin>>,
    session: OnceLock<Arc<dyn Session>>,
    session_factory: Option<Arc<dyn SessionFactory>>,
    cache_config: Option<Arc<dyn CacheConfigProvider>>,
    app_name: Option<String>,
    app_version: Option<String>,
}

impl CloudRegion {
    /// Create a region with the given name and config mapping.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ConfigMap) -> Self {
        Self {
            name: name.into(),
            region_name: None,
            config,
            force_ipv4: false,
            auth: None,
            session: OnceLock::new(),
            session_factory: None,
            cache_config: None,
            app_name: None,
            app_version: None,
        }
    }

    /// Wrap an existing session instead of constructing one lazily.
    ///
    /// When no name is given, the hostname of the session's auth URL is
    /// used so the region still identifies itself usefully in logs.
    #[must_use]
    pub fn from_session(
        session: Arc<dyn Session>,
        name: Option<String>,
        config: ConfigMap,
    ) -> Self {
        let name = name
            .or_else(|| {
                session
                    .auth_url()
                    .and_then(|auth_url| url::Url::parse(&auth_url).ok())
                    .and_then(|parsed| parsed.host_str().map(ToOwned::to_owned))
            })
            .unwrap_or_default();
        let region = Self::new(name, config);
        let _ = region.session.set(session);
        region
    }

    /// Set the region name.
    #[must_use]
    pub fn with_region_name(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    /// Force IPv4 for this region.
    #[must_use]
    pub fn with_force_ipv4(mut self, force_ipv4: bool) -> Self {
        self.force_ipv4 = force_ipv4;
        self
    }

    /// Supply the credential plugin.
    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AuthPlugin>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Supply the session factory used for lazy session construction.
    #[must_use]
    pub fn with_session_factory(mut self, factory: Arc<dyn SessionFactory>) -> Self {
        self.session_factory = Some(factory);
        self
    }

    /// Attach a parent provider for cache settings.
    #[must_use]
    pub fn with_cache_config(mut self, provider: Arc<dyn CacheConfigProvider>) -> Self {
        self.cache_config = Some(provider);
        self
    }

    /// Record the calling application's name and version for session
    /// augmentation.
    #[must_use]
    pub fn with_app_info(
        mut self,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        self.app_name = Some(app_name.into());
        self.app_version = Some(app_version.into());
        self
    }

    /// Replace the session factory. Has no effect on an already-built
    /// session.
    pub fn set_session_factory(&mut self, factory: Arc<dyn SessionFactory>) {
        self.session_factory = Some(factory);
    }

    /// Region (cloud) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic/logical region name, if set.
    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    /// The underlying config mapping.
    #[must_use]
    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    /// Whether IPv4 is forced for this region.
    #[must_use]
    pub fn force_ipv4(&self) -> bool {
        self.force_ipv4
    }

    /// Whether IPv6 is preferred (the inverse of forcing IPv4).
    #[must_use]
    pub fn prefer_ipv6(&self) -> bool {
        !self.force_ipv4
    }

    /// The credential plugin, when one was supplied.
    #[must_use]
    pub fn get_auth(&self) -> Option<Arc<dyn AuthPlugin>> {
        self.auth.clone()
    }

    /// The `auth` sub-mapping from config, empty when absent.
    #[must_use]
    pub fn get_auth_args(&self) -> serde_json::Map<String, Value> {
        self.config
            .get("auth")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Per-service config resolution
// ---------------------------------------------------------------------------

impl CloudRegion {
    /// Endpoint interface for a service, falling back to the global
    /// `interface` setting.
    #[must_use]
    pub fn get_interface(&self, service_type: Option<&str>) -> Option<String> {
        let key = make_key("interface", service_type.unwrap_or(""));
        self.config
            .get_str(&key)
            .or_else(|| self.config.get_str("interface"))
            .map(ToOwned::to_owned)
    }

    /// Configured API version for a service, if any.
    #[must_use]
    pub fn get_api_version(&self, service_type: &str) -> Option<String> {
        let key = make_key("api_version", service_type);
        self.config.get_str(&key).map(ToOwned::to_owned)
    }

    /// Canonical catalog service type, handling legacy multi-version
    /// aliases.
    ///
    /// Some catalogs historically registered the same logical service
    /// under a per-major-version type string (cinder under `volumev2` /
    /// `volumev3`, mistral under `workflowv2`). Callers ask for the
    /// logical type; this resolves the registered one. An explicit
    /// `<service>_service_type` config entry wins over the computed
    /// alias.
    #[must_use]
    pub fn get_service_type(&self, service_type: &str) -> String {
        let key = make_key("service_type", service_type);
        let mut resolved = service_type.to_owned();
        if service_type == "volume" || service_type == "block-storage" {
            match self.get_api_version("volume") {
                Some(version) if version.starts_with('2') => resolved = "volumev2".to_owned(),
                Some(version) if version.starts_with('3') => resolved = "volumev3".to_owned(),
                _ => {}
            }
        } else if service_type == "workflow" {
            if let Some(version) = self.get_api_version(service_type) {
                if version.starts_with('2') {
                    resolved = "workflowv2".to_owned();
                }
            }
        }
        self.config
            .get_str(&key)
            .map_or(resolved, ToOwned::to_owned)
    }

    /// Configured catalog service name for a service, if any.
    #[must_use]
    pub fn get_service_name(&self, service_type: &str) -> Option<String> {
        let key = make_key("service_name", service_type);
        self.config.get_str(&key).map(ToOwned::to_owned)
    }

    /// Explicitly configured endpoint for a service, if any.
    ///
    /// Checks `<service>_endpoint_override` first, then the legacy
    /// `<service>_endpoint` key. An explicit endpoint always
    /// short-circuits catalog discovery.
    #[must_use]
    pub fn get_endpoint(&self, service_type: &str) -> Option<String> {
        let key = make_key("endpoint_override", service_type);
        let legacy_key = make_key("endpoint", service_type);
        self.config
            .get_str(&key)
            .or_else(|| self.config.get_str(&legacy_key))
            .map(ToOwned::to_owned)
    }

    /// Translate a requested version into adapter version arguments,
    /// consulting the configured API version for the service.
    #[must_use]
    pub fn get_version_args(&self, service_key: &str, requested: Option<&str>) -> VersionArgs {
        version_args(requested, self.get_api_version(service_key).as_deref())
    }

    /// Service types this config knows something about, derived from
    /// `*_api_version` / `*_service_type` / `*_service_name` keys.
    #[must_use]
    pub fn get_services(&self) -> Vec<String> {
        let mut services: Vec<String> = self
            .config
            .keys()
            .filter(|key| {
                key.ends_with("api_version")
                    || key.ends_with("service_type")
                    || key.ends_with("service_name")
            })
            .filter_map(|key| {
                let parts: Vec<&str> = key.split('_').collect();
                (parts.len() > 2).then(|| parts[..parts.len() - 2].join("_"))
            })
            .collect();
        services.sort_unstable();
        services.dedup();
        services
    }

    /// Whether this cloud requires floating IPs.
    ///
    /// `Some(false)` when the floating IP source is explicitly "None",
    /// the configured flag otherwise, `None` when discovery is needed.
    #[must_use]
    pub fn requires_floating_ip(&self) -> Option<bool> {
        if self.config.get_str("floating_ip_source") == Some("None") {
            return Some(false);
        }
        self.config.get_bool("requires_floating_ip")
    }
}

// ---------------------------------------------------------------------------
// Session & catalog resolution
// ---------------------------------------------------------------------------

impl CloudRegion {
    /// TLS verify and client-cert arguments for session construction.
    ///
    /// A configured cacert upgrades verification to a custom CA bundle.
    /// A cacert combined with verification disabled is contradictory;
    /// the verify flag wins and a warning is emitted because the cert
    /// will be ignored.
    #[must_use]
    pub fn get_tls_verify_args(&self) -> (TlsVerify, Option<ClientCert>) {
        let verify_flag = self.config.get_bool("verify").unwrap_or(true);
        let cacert = self.config.get_str("cacert");

        let verify = if verify_flag {
            cacert.map_or(TlsVerify::Enabled, |path| {
                TlsVerify::CaBundle(path.to_owned())
            })
        } else {
            if cacert.is_some() {
                warn!(
                    cloud = %self.name,
                    "a cacert is configured but host verification is disabled; \
                     the server certificate will not be verified"
                );
            }
            TlsVerify::Disabled
        };

        let cert = self.config.get_str("cert").map(|cert| {
            match self.config.get_str("key") {
                Some(key) => ClientCert::CertWithKey {
                    cert: cert.to_owned(),
                    key: key.to_owned(),
                },
                None => ClientCert::Cert(cert.to_owned()),
            }
        });

        (verify, cert)
    }

    /// The authenticated session for this region, constructed on first
    /// call and cached.
    ///
    /// Construction requires an auth plugin and a session factory.
    /// Concurrent first calls may each build a session; the first one
    /// published wins and the others are dropped.
    pub fn get_session(&self) -> ConfigResult<Arc<dyn Session>> {
        if let Some(session) = self.session.get() {
            return Ok(session.clone());
        }

        let auth = self.auth.clone().ok_or(ConfigError::AuthParameters)?;
        let factory = self
            .session_factory
            .clone()
            .ok_or(ConfigError::MissingSessionFactory)?;

        let (verify, cert) = self.get_tls_verify_args();
        if !verify.is_enabled() {
            debug!(
                cloud = %self.name,
                region = self.region_name.as_deref().unwrap_or(""),
                "building session with TLS verification disabled"
            );
            warn_insecure_once();
        }

        let timeout = self
            .config
            .get_f64("api_timeout")
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .map(Duration::from_secs_f64);

        let session = factory.create_session(SessionOptions {
            auth,
            verify,
            cert,
            timeout,
        })?;
        session.append_user_agent(CLIENT_NAME, env!("CARGO_PKG_VERSION"));
        session.set_app_info(self.app_name.as_deref(), self.app_version.as_deref());

        Ok(self.session.get_or_init(|| session).clone())
    }

    /// The service catalog from the auth plugin's access context.
    pub fn get_service_catalog(&self) -> ConfigResult<Arc<dyn ServiceCatalog>> {
        let auth = self.auth.clone().ok_or(ConfigError::AuthParameters)?;
        let session = self.get_session()?;
        let access = auth.get_access(session.as_ref())?;
        Ok(access.service_catalog())
    }

    /// Resolve a service endpoint from config or the catalog.
    ///
    /// An explicitly configured endpoint is returned without consulting
    /// the catalog. For `volume` without a configured API version the
    /// catalog is probed across the historical per-version service types,
    /// highest version first. No resolution is not an error: the result
    /// is `Ok(None)` plus a warning diagnostic.
    pub fn get_session_endpoint(
        &self,
        service_key: &str,
        min_version: Option<f64>,
        max_version: Option<f64>,
    ) -> ConfigResult<Option<String>> {
        if let Some(endpoint) = self.get_endpoint(service_key) {
            return Ok(Some(endpoint));
        }

        let service_name = self.get_service_name(service_key);
        let interface = self.get_interface(Some(service_key));

        let candidates = if service_key == "volume" && self.get_api_version("volume").is_none() {
            // Without a configured cinder version there is no way to know
            // which per-version service type the catalog registered.
            volume_candidates(min_version, max_version)
        } else {
            vec![self.get_service_type(service_key)]
        };

        let session = self.get_session()?;
        for service_type in candidates {
            let filter = EndpointFilter::new(service_type)
                .with_service_name(service_name.clone())
                .with_region_name(self.region_name.clone())
                .with_interface(interface.clone());
            match session.get_endpoint(&filter) {
                Ok(endpoint) => return Ok(Some(endpoint)),
                Err(err) if err.is_endpoint_not_found() => {}
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            service_key,
            service_name = service_name.as_deref().unwrap_or(""),
            interface = interface.as_deref().unwrap_or(""),
            region_name = self.region_name.as_deref().unwrap_or(""),
            "service catalog entry not found"
        );
        Ok(None)
    }

    /// A prepped client for one service, bundling the session with the
    /// resolved service type, name, interface, region, and version
    /// arguments.
    pub fn get_session_client(
        &self,
        service_key: &str,
        version: Option<&str>,
    ) -> ConfigResult<ServiceClient> {
        Ok(ServiceClient {
            session: self.get_session()?,
            service_type: self.get_service_type(service_key),
            service_name: self.get_service_name(service_key),
            interface: self.get_interface(Some(service_key)),
            region_name: self.region_name.clone(),
            version_args: self.get_version_args(service_key, version),
        })
    }
}

// ---------------------------------------------------------------------------
// Network classification
// ---------------------------------------------------------------------------

impl CloudRegion {
    /// Parsed network records from `config["networks"]`, in order.
    pub fn networks(&self) -> ConfigResult<Vec<NetworkConfig>> {
        network::parse_networks(self.config.get("networks"))
    }

    /// Names of networks that route externally.
    pub fn get_external_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            net.routes_externally
        }))
    }

    /// Names of networks that route IPv4 externally.
    pub fn get_external_ipv4_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            net.routes_ipv4_externally
        }))
    }

    /// Names of networks that route IPv6 externally.
    pub fn get_external_ipv6_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            net.routes_ipv6_externally
        }))
    }

    /// Names of networks that do not route externally.
    pub fn get_internal_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            !net.routes_externally
        }))
    }

    /// Names of networks that do not route IPv4 externally.
    pub fn get_internal_ipv4_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            !net.routes_ipv4_externally
        }))
    }

    /// Names of networks that do not route IPv6 externally.
    pub fn get_internal_ipv6_networks(&self) -> ConfigResult<Vec<String>> {
        Ok(network::names_where(&self.networks()?, |net| {
            !net.routes_ipv6_externally
        }))
    }

    /// The first network flagged for default interactions, if any.
    pub fn get_default_network(&self) -> ConfigResult<Option<String>> {
        Ok(network::first_name_where(&self.networks()?, |net| {
            net.default_interface
        }))
    }

    /// The first network flagged as NAT destination, if any.
    pub fn get_nat_destination(&self) -> ConfigResult<Option<String>> {
        Ok(network::first_name_where(&self.networks()?, |net| {
            net.nat_destination
        }))
    }

    /// The first network flagged as NAT source, if any.
    pub fn get_nat_source(&self) -> ConfigResult<Option<String>> {
        Ok(network::first_name_where(&self.networks()?, |net| {
            net.nat_source
        }))
    }
}

// ---------------------------------------------------------------------------
// Cache settings pass-through
// ---------------------------------------------------------------------------

impl CloudRegion {
    /// Default cache expiration from the parent provider.
    #[must_use]
    pub fn get_cache_expiration_time(&self) -> Option<f64> {
        self.cache_config
            .as_ref()
            .and_then(|provider| provider.get_cache_expiration_time())
    }

    /// Cache path from the parent provider.
    #[must_use]
    pub fn get_cache_path(&self) -> Option<String> {
        self.cache_config
            .as_ref()
            .and_then(|provider| provider.get_cache_path())
    }

    /// Cache backend class from the parent provider.
    #[must_use]
    pub fn get_cache_class(&self) -> Option<String> {
        self.cache_config
            .as_ref()
            .and_then(|provider| provider.get_cache_class())
    }

    /// Cache backend arguments from the parent provider.
    #[must_use]
    pub fn get_cache_arguments(&self) -> Option<std::collections::HashMap<String, Value>> {
        self.cache_config
            .as_ref()
            .and_then(|provider| provider.get_cache_arguments())
    }

    /// Per-resource expiration overrides from the parent provider.
    #[must_use]
    pub fn get_cache_expiration(&self) -> Option<std::collections::HashMap<String, Value>> {
        self.cache_config
            .as_ref()
            .and_then(|provider| provider.get_cache_expiration())
    }

    /// Expiration for one resource type, coerced to seconds, or the
    /// given default when the resource has no entry.
    #[must_use]
    pub fn get_cache_resource_expiration(
        &self,
        resource: &str,
        default: Option<f64>,
    ) -> Option<f64> {
        let provider = self.cache_config.as_ref()?;
        let expiration = provider.get_cache_expiration().unwrap_or_default();
        match expiration.get(resource) {
            None => default,
            Some(value) => value_as_f64(value),
        }
    }
}

/// Coerce a JSON value to f64, accepting numeric strings.
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl PartialEq for CloudRegion {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.region_name == other.region_name
            && self.config == other.config
    }
}

impl std::fmt::Debug for CloudRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudRegion")
            .field("name", &self.name)
            .field("region_name", &self.region_name)
            .field("config", &self.config)
            .field("force_ipv4", &self.force_ipv4)
            .field("has_auth", &self.auth.is_some())
            .field("has_session", &self.session.get().is_some())
            .field("app_name", &self.app_name)
            .field("app_version", &self.app_version)
            .finish_non_exhaustive()
    }
}
