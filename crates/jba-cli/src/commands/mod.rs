//! Command handler modules for the `jba` binary.
//!
//! Shared startup wiring lives here; each subcommand has its own module.

pub mod fees;
pub mod payouts;

use anyhow::{Context, Result};
use jba_config::AuditEnv;
use jba_numeric::Amount;
use jba_reconcile::{ReconcileConfig, ReconcileEngine};
use jba_subgraph::HttpSubgraphClient;
use std::path::Path;

/// Load the env file and build the indexer client.
pub fn connect(env_file: &Path) -> Result<HttpSubgraphClient> {
    let env = AuditEnv::load(env_file)?;
    Ok(HttpSubgraphClient::new(env.endpoint))
}

/// Engine over the default constants, optionally with a custom fee tolerance.
pub fn build_engine(tolerance: Option<Amount>) -> Result<ReconcileEngine> {
    let mut config = ReconcileConfig::default();
    if let Some(wei) = tolerance {
        config = config.with_fee_tolerance(wei);
    }
    ReconcileEngine::new(config).context("reconcile config rejected")
}
