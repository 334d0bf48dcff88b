use tracing::warn;

use crate::{Error, Result};

/// Provisioning metadata for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Boot image for new instances. Empty for endpoints without a known image.
    pub image_id: &'static str,
}

/// Region used when the operator points the driver at a custom API endpoint.
pub const CUSTOM_ENDPOINT: &str = "custom-endpoint";

// Ubuntu 20.04 LTS 20211021 hvm:ebs-ssd (amd64)
static REGIONS: &[(&str, Region)] = &[
    ("af-south-1", Region { image_id: "ami-0ff86122fd4ad7208" }),
    ("ap-east-1", Region { image_id: "ami-0a9c1cc3697104990" }),
    ("ap-northeast-1", Region { image_id: "ami-036d0684fc96830ca" }),
    ("ap-northeast-2", Region { image_id: "ami-0f8b8babb98cc66d0" }),
    ("ap-northeast-3", Region { image_id: "ami-0c3904e7363bbc4bc" }),
    ("ap-south-1", Region { image_id: "ami-0567e0d2b4b2169ae" }),
    ("ap-southeast-1", Region { image_id: "ami-0fed77069cd5a6d6c" }),
    ("ap-southeast-2", Region { image_id: "ami-0bf8b986de7e3c7ce" }),
    ("ca-central-1", Region { image_id: "ami-0bb84e7329f4fa1f7" }),
    ("cn-north-1", Region { image_id: "ami-0741e7b8b4fb0001c" }),
    ("cn-northwest-1", Region { image_id: "ami-0883e8062ff31f727" }),
    ("eu-central-1", Region { image_id: "ami-0a49b025fffbbdac6" }),
    ("eu-north-1", Region { image_id: "ami-0bd9c26722573e69b" }),
    ("eu-south-1", Region { image_id: "ami-0f8ce9c417115413d" }),
    ("eu-west-1", Region { image_id: "ami-08edbb0e85d6a0a07" }),
    ("eu-west-2", Region { image_id: "ami-0fdf70ed5c34c5f52" }),
    ("eu-west-3", Region { image_id: "ami-06d79c60d7454e2af" }),
    ("me-south-1", Region { image_id: "ami-0b4946d7420c44be4" }),
    ("sa-east-1", Region { image_id: "ami-0e66f5495b4efdd0f" }),
    ("us-east-1", Region { image_id: "ami-083654bd07b5da81d" }),
    ("us-east-2", Region { image_id: "ami-0629230e074c580f2" }),
    ("us-gov-east-1", Region { image_id: "ami-0fe6338c47e61cd5d" }),
    ("us-gov-west-1", Region { image_id: "ami-087ee83c8de303181" }),
    ("us-west-1", Region { image_id: "ami-053ac55bdcfe96e85" }),
    ("us-west-2", Region { image_id: "ami-036d46416a34a611c" }),
    (CUSTOM_ENDPOINT, Region { image_id: "" }),
];

fn lookup(candidate: &str) -> Option<(&'static str, Region)> {
    REGIONS
        .iter()
        .find(|(name, _)| *name == candidate)
        .map(|(name, region)| (*name, *region))
}

/// Every known region identifier, in table order.
pub fn list_regions() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

/// Accept `candidate` only if it names a known region. Case-sensitive.
pub fn validate_region(candidate: &str) -> Result<&'static str> {
    lookup(candidate)
        .map(|(name, _)| name)
        .ok_or_else(|| Error::InvalidRegion(candidate.to_string()))
}

/// Boot image for a region, or `None` when the region has no image on record
/// (the custom endpoint sentinel).
pub fn image_for(region: &str) -> Result<Option<&'static str>> {
    let (name, meta) = lookup(region).ok_or_else(|| Error::InvalidRegion(region.to_string()))?;

    if meta.image_id.is_empty() {
        warn!(region = name, "region has no default image; one must be supplied");
        return Ok(None);
    }

    Ok(Some(meta.image_id))
}
