use std::fs;
use std::path::Path;

use netplan::types::FirewallRule;
use tracing::{info, warn};

use crate::error::CliError;

/// Load existing allowances from a JSON file shaped like the compute API's
/// `allowed` list. Without a file the project is treated as having none.
pub fn load_rules(path: Option<&Path>) -> Result<Vec<FirewallRule>, CliError> {
    let Some(path) = path else {
        warn!("no firewall rules file configured, assuming an empty ruleset");
        return Ok(Vec::new());
    };

    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadRules {
        path: path.to_path_buf(),
        source,
    })?;

    let rules = parse_rules(&raw)?;
    info!(path = %path.display(), count = rules.len(), "loaded firewall rules");
    Ok(rules)
}

fn parse_rules(raw: &str) -> Result<Vec<FirewallRule>, CliError> {
    Ok(serde_json::from_str(raw)?)
}
