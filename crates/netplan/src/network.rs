//! Parsing of the `network:subnetwork` grammar.
//!
//! A single attachment is either a bare network name or `network:subnetwork`,
//! where an empty subnetwork part means the attachment has none. The list form
//! joins attachments with commas: `"n1:s1,n2:,n3:s3"`.
//!
//! Names follow the compute API resource naming rule: a lowercase letter,
//! then lowercase letters, digits or hyphens, not ending in a hyphen, at most
//! [`MAX_NAME_LEN`] characters.

use tracing::debug;

use crate::types::NetworkAttachment;
use crate::{Error, Result};

pub const MAX_NAME_LEN: usize = 63;

/// Which naming rule a network or subnetwork name broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameViolation {
    #[error("network name is empty")]
    Empty,

    #[error("name {name:?} is longer than {max} characters", max = MAX_NAME_LEN)]
    TooLong { name: String },

    #[error("name {name:?} must start with a lowercase letter")]
    InvalidStart { name: String },

    #[error("name {name:?} must not end with a hyphen")]
    TrailingHyphen { name: String },

    #[error("name {name:?} contains invalid character {found:?}")]
    InvalidCharacter { name: String, found: char },
}

/// Check a network or subnetwork name against the naming rule.
pub fn validate_name(name: &str) -> std::result::Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }

    if name.len() > MAX_NAME_LEN {
        return Err(NameViolation::TooLong { name: name.into() });
    }

    if let Some(found) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(NameViolation::InvalidCharacter {
            name: name.into(),
            found,
        });
    }

    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(NameViolation::InvalidStart { name: name.into() });
    }

    if name.ends_with('-') {
        return Err(NameViolation::TrailingHyphen { name: name.into() });
    }

    Ok(())
}

/// Parse one `network[:subnetwork]` segment.
pub fn parse_attachment(segment: &str) -> Result<NetworkAttachment> {
    let (network, subnetwork) = match segment.split_once(':') {
        Some((network, "")) => (network, None),
        Some((network, subnetwork)) => (network, Some(subnetwork)),
        None => (segment, None),
    };

    let invalid = |violation| Error::InvalidNetworkSpec {
        segment: segment.to_string(),
        violation,
    };

    validate_name(network).map_err(invalid)?;
    if let Some(subnetwork) = subnetwork {
        validate_name(subnetwork).map_err(invalid)?;
    }

    Ok(NetworkAttachment {
        network: network.to_string(),
        subnetwork: subnetwork.map(str::to_string),
    })
}

/// Parse a comma-separated list of attachments, stopping at the first bad one.
///
/// An empty string is an empty list.
pub fn parse_additional_networks(raw: &str) -> Result<Vec<NetworkAttachment>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let attachments = raw
        .split(',')
        .map(parse_attachment)
        .collect::<Result<Vec<_>>>()?;

    debug!(count = attachments.len(), "parsed additional networks");
    Ok(attachments)
}
