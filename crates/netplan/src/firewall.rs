use tracing::debug;

use crate::types::{FirewallRule, MissingPorts, PortSpec};

/// Required ports that no existing rule of the same protocol covers.
///
/// Buckets list ports in the order they were first required, each at most
/// once. Protocols with nothing missing are left out, so an empty map means
/// every port is already open.
pub fn missing_ports(rules: &[FirewallRule], required: &[PortSpec]) -> MissingPorts {
    let mut missing = MissingPorts::new();

    for spec in required {
        let covered = rules
            .iter()
            .filter(|rule| rule.protocol == spec.protocol.as_str())
            .any(|rule| rule_covers(rule, &spec.port));

        if covered {
            continue;
        }

        let bucket = missing.entry(spec.protocol).or_default();
        if !bucket.contains(&spec.port) {
            bucket.push(spec.port.clone());
        }
    }

    debug!(rules = rules.len(), required = required.len(), ?missing, "firewall audit done");
    missing
}

/// Allow rules that would open everything in `missing`, one per protocol.
pub fn rules_to_open(missing: &MissingPorts) -> Vec<FirewallRule> {
    missing
        .iter()
        .filter(|(_, ports)| !ports.is_empty())
        .map(|(protocol, ports)| FirewallRule {
            protocol: protocol.as_str().to_string(),
            ports: ports.clone(),
        })
        .collect()
}

fn rule_covers(rule: &FirewallRule, port: &str) -> bool {
    rule.ports
        .iter()
        .any(|entry| entry == port || range_contains(entry, port))
}

/// `true` if `entry` is a `low-high` range holding `port`. Anything that does
/// not parse as numbers covers nothing.
fn range_contains(entry: &str, port: &str) -> bool {
    let Some((low, high)) = entry.split_once('-') else {
        return false;
    };

    match (low.parse::<u16>(), high.parse::<u16>(), port.parse::<u16>()) {
        (Ok(low), Ok(high), Ok(port)) => (low..=high).contains(&port),
        _ => false,
    }
}
