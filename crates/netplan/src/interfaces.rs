use tracing::debug;

use crate::network::{parse_additional_networks, validate_name};
use crate::types::{NetworkAttachment, NetworkInterface};
use crate::{Error, Result};

/// Base of the compute API; the global namespace of a project hangs off it.
pub const COMPUTE_API_URL: &str = "https://www.googleapis.com/compute/v1/projects/";

/// The network layout the driver was configured with.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    pub network: String,
    /// Primary subnetwork. Empty means none.
    pub subnetwork: String,
    /// Extra attachments in `n1:s1,n2:,n3` form.
    pub additional_networks: String,
    pub use_internal_ip_only: bool,
}

/// Where network and subnetwork names resolve to URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub project: String,
    pub region: String,
    pub global_url: String,
}

impl Scope {
    pub fn new(project: impl Into<String>, region: impl Into<String>) -> Self {
        let project = project.into();
        let global_url = format!("{COMPUTE_API_URL}{project}/global");
        Self {
            project,
            region: region.into(),
            global_url,
        }
    }

    /// Same scope, resolving global resources under `global_url` instead.
    pub fn with_global_url(mut self, global_url: impl Into<String>) -> Self {
        self.global_url = global_url.into();
        self
    }

    pub fn network_url(&self, network: &str) -> String {
        format!("{}/networks/{network}", self.global_url)
    }

    pub fn subnetwork_url(&self, subnetwork: &str) -> String {
        format!(
            "projects/{}/regions/{}/subnetworks/{subnetwork}",
            self.project, self.region
        )
    }

    fn interface(&self, attachment: &NetworkAttachment, external_access: bool) -> NetworkInterface {
        NetworkInterface {
            network_url: self.network_url(&attachment.network),
            subnetwork_url: attachment
                .subnetwork
                .as_deref()
                .map(|sub| self.subnetwork_url(sub)),
            external_access,
        }
    }
}

/// Region a zone belongs to: `us-central1-a` → `us-central1`.
///
/// Only a single-letter zone suffix is stripped, so a region passed in place
/// of a zone comes back unchanged.
pub fn region_from_zone(zone: &str) -> &str {
    match zone.rsplit_once('-') {
        Some((region, suffix))
            if !region.is_empty()
                && suffix.len() == 1
                && suffix.bytes().all(|b| b.is_ascii_lowercase()) =>
        {
            region
        }
        _ => zone,
    }
}

/// Validate the primary network and subnetwork as given; an empty subnetwork
/// means none.
fn primary_attachment(topology: &Topology) -> Result<NetworkAttachment> {
    let check = |name: &str| {
        validate_name(name).map_err(|violation| Error::InvalidNetworkSpec {
            segment: name.to_string(),
            violation,
        })
    };

    check(&topology.network)?;
    let subnetwork = if topology.subnetwork.is_empty() {
        None
    } else {
        check(&topology.subnetwork)?;
        Some(topology.subnetwork.clone())
    };

    Ok(NetworkAttachment {
        network: topology.network.clone(),
        subnetwork,
    })
}

/// Interfaces for a new instance: the primary network first, then each
/// additional network in declaration order.
///
/// Only the primary interface can be externally reachable, and only when the
/// instance is not restricted to internal IPs. Nothing is returned unless
/// every network definition is valid.
pub fn build_interfaces(topology: &Topology, scope: &Scope) -> Result<Vec<NetworkInterface>> {
    let primary = primary_attachment(topology)?;
    let additional = parse_additional_networks(&topology.additional_networks)?;

    let mut interfaces = Vec::with_capacity(1 + additional.len());
    interfaces.push(scope.interface(&primary, !topology.use_internal_ip_only));
    interfaces.extend(additional.iter().map(|attachment| scope.interface(attachment, false)));

    debug!(
        count = interfaces.len(),
        internal_only = topology.use_internal_ip_only,
        "built network interfaces"
    );
    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ONE_TO_ONE_NAT;
    use crate::{Error, NameViolation};

    fn scope() -> Scope {
        Scope::new("project", region_from_zone("zone-a")).with_global_url("https://global")
    }

    fn topology(additional_networks: &str) -> Topology {
        Topology {
            network: "network".into(),
            subnetwork: "subnetwork".into(),
            additional_networks: additional_networks.into(),
            use_internal_ip_only: false,
        }
    }

    #[test]
    fn test_region_from_zone() {
        assert_eq!(region_from_zone("zone-a"), "zone");
        assert_eq!(region_from_zone("us-central1-a"), "us-central1");
        assert_eq!(region_from_zone("europe-west4-b"), "europe-west4");
        assert_eq!(region_from_zone("local"), "local");
        assert_eq!(region_from_zone("us-central1"), "us-central1");
        assert_eq!(region_from_zone("europe-west4"), "europe-west4");
        assert_eq!(region_from_zone("zone-A"), "zone-A");
        assert_eq!(region_from_zone("-a"), "-a");
    }

    #[test]
    fn test_default_global_url() {
        let scope = Scope::new("my-project", "us-central1");
        assert_eq!(
            scope.network_url("default"),
            "https://www.googleapis.com/compute/v1/projects/my-project/global/networks/default"
        );
    }

    #[test]
    fn test_network_configuration() {
        let interfaces = build_interfaces(&topology(""), &scope()).unwrap();

        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].network_url, "https://global/networks/network");
        assert_eq!(
            interfaces[0].subnetwork_url.as_deref(),
            Some("projects/project/regions/zone/subnetworks/subnetwork")
        );
        assert!(interfaces[0].external_access);
        assert_eq!(interfaces[0].access_configs().len(), 1);
        assert_eq!(interfaces[0].access_configs()[0].kind, ONE_TO_ONE_NAT);
    }

    #[test]
    fn test_primary_without_subnetwork() {
        let topology = Topology {
            network: "default".into(),
            ..Default::default()
        };
        let interfaces = build_interfaces(&topology, &scope()).unwrap();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].subnetwork_url, None);
    }

    #[test]
    fn test_internal_ip_only() {
        let topology = Topology {
            use_internal_ip_only: true,
            ..topology("extra:")
        };
        let interfaces = build_interfaces(&topology, &scope()).unwrap();
        assert_eq!(interfaces.len(), 2);
        assert!(interfaces.iter().all(|iface| !iface.external_access));
        assert!(interfaces.iter().all(|iface| iface.access_configs().is_empty()));
    }

    #[test]
    fn test_network_configuration_with_additional_networks() {
        let interfaces = build_interfaces(
            &topology("network-1:subnetwork-1,network-2:,network-3:subnetwork-3"),
            &scope(),
        )
        .unwrap();

        assert_eq!(interfaces.len(), 4);

        assert_eq!(interfaces[0].network_url, "https://global/networks/network");
        assert!(interfaces[0].external_access);

        assert_eq!(interfaces[1].network_url, "https://global/networks/network-1");
        assert_eq!(
            interfaces[1].subnetwork_url.as_deref(),
            Some("projects/project/regions/zone/subnetworks/subnetwork-1")
        );
        assert!(!interfaces[1].external_access);

        assert_eq!(interfaces[2].network_url, "https://global/networks/network-2");
        assert_eq!(interfaces[2].subnetwork_url, None);
        assert!(!interfaces[2].external_access);

        assert_eq!(interfaces[3].network_url, "https://global/networks/network-3");
        assert_eq!(
            interfaces[3].subnetwork_url.as_deref(),
            Some("projects/project/regions/zone/subnetworks/subnetwork-3")
        );
        assert!(interfaces[3].access_configs().is_empty());
    }

    #[test]
    fn test_network_configuration_with_invalid_additional_network() {
        for additional in [":", "1-network:", "network:1-subnetwork", "network-", ":subnetwork-"] {
            let result = build_interfaces(&topology(additional), &scope());
            assert!(
                matches!(&result, Err(Error::InvalidNetworkSpec { segment, .. }) if segment == additional),
                "additional networks {additional:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_invalid_primary_network() {
        let topology = Topology {
            network: "Default".into(),
            ..Default::default()
        };
        assert!(matches!(
            build_interfaces(&topology, &scope()),
            Err(Error::InvalidNetworkSpec {
                violation: NameViolation::InvalidCharacter { found: 'D', .. },
                ..
            })
        ));
    }

    #[test]
    fn test_primary_network_with_colon_is_rejected() {
        let topology = Topology {
            network: "net:sneaky".into(),
            ..Default::default()
        };
        assert_eq!(
            build_interfaces(&topology, &scope()),
            Err(Error::InvalidNetworkSpec {
                segment: "net:sneaky".into(),
                violation: NameViolation::InvalidCharacter {
                    name: "net:sneaky".into(),
                    found: ':',
                },
            })
        );
    }

    #[test]
    fn test_invalid_primary_subnetwork_reports_its_own_value() {
        let topology = Topology {
            network: "network".into(),
            subnetwork: "sub-".into(),
            ..Default::default()
        };
        assert_eq!(
            build_interfaces(&topology, &scope()),
            Err(Error::InvalidNetworkSpec {
                segment: "sub-".into(),
                violation: NameViolation::TrailingHyphen {
                    name: "sub-".into(),
                },
            })
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let topology = topology("a:b,c");
        assert_eq!(
            build_interfaces(&topology, &scope()),
            build_interfaces(&topology, &scope())
        );
    }
}
