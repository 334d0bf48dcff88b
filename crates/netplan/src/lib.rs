//! Network and firewall planning for new compute instances.
//!
//! Everything in this crate is a pure computation over the driver's declared
//! topology: no cloud API is called here. Callers feed in configuration strings
//! and the firewall rules they fetched, and get back interface descriptors,
//! required ports and the ports still missing from the ruleset.

pub mod firewall;
pub mod interfaces;
pub mod network;
pub mod plan;
pub mod ports;
pub mod region;
pub mod tags;
pub mod types;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use network::NameViolation;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid region specified: {0}")]
    InvalidRegion(String),

    #[error("invalid network definition {segment:?}: {violation}")]
    InvalidNetworkSpec {
        segment: String,
        violation: NameViolation,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported protocol: {0}")]
pub struct UnknownProtocol(pub String);

/// Transport protocols a firewall allowance can name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(UnknownProtocol(other.to_string())),
        }
    }
}
