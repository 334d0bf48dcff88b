use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Protocol;

/// Access config type the compute API uses for a one-to-one external NAT.
pub const ONE_TO_ONE_NAT: &str = "ONE_TO_ONE_NAT";

/// A network, optionally narrowed to one of its subnetworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAttachment {
    pub network: String,
    pub subnetwork: Option<String>,
}

/// One entry of the instance's network interface list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub network_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnetwork_url: Option<String>,
    pub external_access: bool,
}

impl NetworkInterface {
    /// Access configs to send with the create request. At most one interface
    /// per instance may carry an external NAT.
    pub fn access_configs(&self) -> Vec<AccessConfig> {
        if self.external_access {
            vec![AccessConfig {
                kind: ONE_TO_ONE_NAT.into(),
            }]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessConfig {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A port the workload needs reachable, e.g. `2376/tcp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSpec {
    pub port: String,
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn tcp(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            protocol: Protocol::Tcp,
        }
    }

    pub fn udp(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            protocol: Protocol::Udp,
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

/// One allowance of an existing firewall, as reported by the compute API.
///
/// `ports` entries are single ports (`"22"`) or inclusive ranges (`"1024-2048"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    #[serde(rename = "IPProtocol")]
    pub protocol: String,
    #[serde(default)]
    pub ports: Vec<String>,
}

impl FirewallRule {
    pub fn new(protocol: impl Into<String>, ports: &[&str]) -> Self {
        Self {
            protocol: protocol.into(),
            ports: ports.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

/// Ports still closed, grouped by protocol. Never holds an empty bucket.
pub type MissingPorts = BTreeMap<Protocol, Vec<String>>;
