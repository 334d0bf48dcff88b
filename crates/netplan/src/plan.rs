use serde::Serialize;
use tracing::info;

use crate::firewall::{missing_ports, rules_to_open};
use crate::interfaces::{Scope, Topology, build_interfaces};
use crate::ports::{Workload, required_ports};
use crate::region::{image_for, validate_region};
use crate::tags::normalize_tags;
use crate::types::{FirewallRule, MissingPorts, NetworkInterface, PortSpec};
use crate::Result;

/// Everything needed to plan one instance.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub region: String,
    pub topology: Topology,
    pub scope: Scope,
    pub workload: Workload,
    pub tags: String,
    /// Allowances already present on the project's firewall.
    pub existing_rules: Vec<FirewallRule>,
}

/// What the caller needs to open firewall ports and issue the create call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisioningPlan {
    pub region: String,
    pub image_id: Option<String>,
    pub tags: Vec<String>,
    pub interfaces: Vec<NetworkInterface>,
    pub required_ports: Vec<PortSpec>,
    pub missing_ports: MissingPorts,
    pub rules_to_open: Vec<FirewallRule>,
}

/// Validate the request and compute the full plan.
///
/// Fails on an unknown region or any malformed network definition; the port
/// and tag computations never fail.
pub fn plan(request: &PlanRequest) -> Result<ProvisioningPlan> {
    let region = validate_region(&request.region)?;
    let image_id = image_for(region)?.map(str::to_string);

    let required = required_ports(&request.workload);
    let missing = missing_ports(&request.existing_rules, &required);
    let to_open = rules_to_open(&missing);

    let interfaces = build_interfaces(&request.topology, &request.scope)?;
    let tags = normalize_tags(&request.tags);

    info!(
        region,
        interfaces = interfaces.len(),
        rules_to_open = to_open.len(),
        "provisioning plan ready"
    );

    Ok(ProvisioningPlan {
        region: region.to_string(),
        image_id,
        tags,
        interfaces,
        required_ports: required,
        missing_ports: missing,
        rules_to_open: to_open,
    })
}
