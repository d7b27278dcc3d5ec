//! `jba payouts`: split payouts vs. downstream payments.

use anyhow::Result;
use jba_report::{write_report_file, ReportLinks};
use std::path::Path;
use tracing::info;

/// Run the payout audit and write the underpayment report to `out`.
///
/// The report is only written once reconciliation has fully succeeded.
pub async fn run(env_file: &Path, out: &Path, source_project: u64) -> Result<()> {
    let client = super::connect(env_file)?;
    let engine = super::build_engine(None)?;

    let audit = jba_audit::run_payout_audit(&client, &engine, source_project).await?;

    write_report_file(out, &audit.ledger, &ReportLinks::default())?;
    info!(
        projects = audit.ledger.len(),
        path = %out.display(),
        "underpayment report written"
    );
    Ok(())
}
