//! `jba fees`: recorded protocol fees vs. recomputed fees.

use anyhow::Result;
use jba_numeric::Amount;
use jba_report::fee_shortfall_lines;
use std::path::Path;
use tracing::info;

pub async fn run(env_file: &Path, tolerance: Option<Amount>) -> Result<()> {
    let client = super::connect(env_file)?;
    let engine = super::build_engine(tolerance)?;

    let audit = jba_audit::run_fee_audit(&client, &engine).await?;

    if audit.ledger.is_empty() {
        info!("no fee shortfalls above tolerance");
    }
    for line in fee_shortfall_lines(&audit.ledger) {
        info!("{line}");
    }
    Ok(())
}
