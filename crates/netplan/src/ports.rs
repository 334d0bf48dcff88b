use tracing::warn;

use crate::Protocol;
use crate::types::PortSpec;

/// Port the container engine listens on.
pub const WORKLOAD_PORT: u16 = 2376;

/// Cluster manager port used when the endpoint URL does not name one.
pub const DEFAULT_CLUSTER_PORT: u16 = 3376;

/// The parts of the driver configuration that decide which ports must be open.
#[derive(Debug, Clone, Default)]
pub struct Workload {
    /// Whether this instance acts as the cluster manager.
    pub cluster_master: bool,
    /// Cluster endpoint URL, e.g. `tcp://0.0.0.0:3376`.
    pub cluster_host: String,
    /// Operator-declared ports in `port[/proto]` form.
    pub extra_ports: Vec<String>,
}

/// Ports the workload needs reachable: the engine port, the cluster port when
/// acting as cluster master, then the extra ports in declared order.
///
/// Duplicates are passed through untouched.
pub fn required_ports(workload: &Workload) -> Vec<PortSpec> {
    let mut ports = Vec::with_capacity(2 + workload.extra_ports.len());
    ports.push(PortSpec::tcp(WORKLOAD_PORT.to_string()));

    if workload.cluster_master {
        ports.push(PortSpec::tcp(cluster_port(&workload.cluster_host).to_string()));
    }

    ports.extend(workload.extra_ports.iter().map(|raw| parse_port_spec(raw)));
    ports
}

/// Parse `port[/proto]`. A missing suffix means tcp; an unsupported one is
/// logged and treated as tcp as well.
pub fn parse_port_spec(raw: &str) -> PortSpec {
    let Some((port, suffix)) = raw.split_once('/') else {
        return PortSpec::tcp(raw);
    };

    let protocol = suffix.parse::<Protocol>().unwrap_or_else(|e| {
        warn!(port = raw, "{e}, assuming tcp");
        Protocol::Tcp
    });

    PortSpec {
        port: port.to_string(),
        protocol,
    }
}

// A malformed endpoint must not fail the whole computation.
fn cluster_port(cluster_host: &str) -> u16 {
    port_from_endpoint(cluster_host).unwrap_or_else(|| {
        warn!(
            cluster_host,
            default = DEFAULT_CLUSTER_PORT,
            "no port in cluster endpoint, using default"
        );
        DEFAULT_CLUSTER_PORT
    })
}

/// Extract the port from the `host:port` part of a URL such as `tcp://host:3376`.
fn port_from_endpoint(endpoint: &str) -> Option<u16> {
    let rest = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let (_, port) = authority.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok().filter(|p| *p != 0)
}
