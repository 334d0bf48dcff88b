use std::env;
use std::path::PathBuf;

use netplan::interfaces::{Scope, Topology, region_from_zone};
use netplan::ports::Workload;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub region: String,
    pub project: String,
    pub zone: String,
    pub network: String,
    pub subnetwork: String,
    pub additional_networks: String,
    pub use_internal_ip_only: bool,
    pub tags: String,
    pub open_ports: Vec<String>,
    pub cluster_master: bool,
    pub cluster_host: String,
    pub firewall_rules: Option<PathBuf>,
}

impl PlanConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let flag = |key: &'static str| match lookup(key).as_deref() {
            None | Some("") => Ok(false),
            Some(raw) => parse_bool(raw).ok_or_else(|| ConfigError::Invalid {
                key,
                value: raw.to_string(),
            }),
        };

        Ok(Self {
            region: required("NETPLAN_REGION")?,
            project: required("NETPLAN_PROJECT")?,
            zone: required("NETPLAN_ZONE")?,
            network: lookup("NETPLAN_NETWORK").unwrap_or_else(|| "default".into()),
            subnetwork: lookup("NETPLAN_SUBNETWORK").unwrap_or_default(),
            additional_networks: lookup("NETPLAN_ADDITIONAL_NETWORKS").unwrap_or_default(),
            use_internal_ip_only: flag("NETPLAN_USE_INTERNAL_IP_ONLY")?,
            tags: lookup("NETPLAN_TAGS").unwrap_or_default(),
            open_ports: lookup("NETPLAN_OPEN_PORTS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            cluster_master: flag("NETPLAN_CLUSTER_MASTER")?,
            cluster_host: lookup("NETPLAN_CLUSTER_HOST").unwrap_or_default(),
            firewall_rules: lookup("NETPLAN_FIREWALL_RULES")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn topology(&self) -> Topology {
        Topology {
            network: self.network.clone(),
            subnetwork: self.subnetwork.clone(),
            additional_networks: self.additional_networks.clone(),
            use_internal_ip_only: self.use_internal_ip_only,
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::new(self.project.clone(), region_from_zone(&self.zone))
    }

    pub fn workload(&self) -> Workload {
        Workload {
            cluster_master: self.cluster_master,
            cluster_host: self.cluster_host.clone(),
            extra_ports: self.open_ports.clone(),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
