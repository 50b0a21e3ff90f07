//! Network records and classification helpers.
//!
//! The `networks` config entry is an ordered sequence of records; order
//! matters only for the first-match pickers (default network, NAT
//! destination, NAT source).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// One configured network and its routing/NAT classification flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network name.
    pub name: String,
    /// Whether the network routes traffic externally.
    #[serde(default)]
    pub routes_externally: bool,
    /// Whether the network routes IPv4 traffic externally.
    #[serde(default)]
    pub routes_ipv4_externally: bool,
    /// Whether the network routes IPv6 traffic externally.
    #[serde(default)]
    pub routes_ipv6_externally: bool,
    /// Whether this is the network for default interactions.
    #[serde(default)]
    pub default_interface: bool,
    /// Whether this network is the NAT destination.
    #[serde(default)]
    pub nat_destination: bool,
    /// Whether this network is the NAT source.
    #[serde(default)]
    pub nat_source: bool,
}

impl NetworkConfig {
    /// Create a record with the given name and all flags unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes_externally: false,
            routes_ipv4_externally: false,
            routes_ipv6_externally: false,
            default_interface: false,
            nat_destination: false,
            nat_source: false,
        }
    }
}

/// Parse the `networks` config value into records.
///
/// An absent value yields an empty list; a present value must
/// deserialize into a sequence of [`NetworkConfig`].
pub fn parse_networks(value: Option<&Value>) -> ConfigResult<Vec<NetworkConfig>> {
    match value {
        None => Ok(Vec::new()),
        Some(value) => {
            serde_json::from_value(value.clone()).map_err(ConfigError::InvalidNetworks)
        }
    }
}

/// Names of networks selected by the predicate, preserving order.
pub fn names_where(
    networks: &[NetworkConfig],
    predicate: impl Fn(&NetworkConfig) -> bool,
) -> Vec<String> {
    networks
        .iter()
        .filter(|net| predicate(net))
        .map(|net| net.name.clone())
        .collect()
}

/// Name of the first network selected by the predicate, if any.
pub fn first_name_where(
    networks: &[NetworkConfig],
    predicate: impl Fn(&NetworkConfig) -> bool,
) -> Option<String> {
    networks.iter().find(|net| predicate(net)).map(|net| net.name.clone())
}
