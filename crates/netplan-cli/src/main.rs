mod config;
mod error;
mod rules;

use std::process::ExitCode;

use netplan::plan::{PlanRequest, plan};
use tracing_subscriber::EnvFilter;

use crate::config::PlanConfig;
use crate::error::CliError;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the plan.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = PlanConfig::from_env()?;
    let existing_rules = rules::load_rules(config.firewall_rules.as_deref())?;

    let request = PlanRequest {
        region: config.region.clone(),
        topology: config.topology(),
        scope: config.scope(),
        workload: config.workload(),
        tags: config.tags.clone(),
        existing_rules,
    };

    let plan = plan(&request)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
