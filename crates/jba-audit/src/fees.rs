use anyhow::{Context, Result};
use jba_events::{decode_distribution_events, Pipeline};
use jba_reconcile::{FeeAudit, ReconcileEngine};
use jba_subgraph::{queries, SubgraphClient};
use tracing::{debug, info};

use crate::fetch_data;

/// Recorded-fee vs. recomputed-fee audit over one page of distributions.
pub async fn run_fee_audit(
    client: &dyn SubgraphClient,
    engine: &ReconcileEngine,
) -> Result<FeeAudit> {
    let data = fetch_data(
        client,
        &queries::fee_distributions_query(),
        "fee distribution events",
    )
    .await?;
    let distributions = decode_distribution_events(&data, Pipeline::Fees)
        .context("decode fee distribution events failed")?;
    info!(count = distributions.len(), "fee distribution events fetched");

    let mut audit = FeeAudit::new();
    for distribution in &distributions {
        let check = engine
            .reconcile_fee(distribution, &mut audit)
            .with_context(|| format!("reconcile fee for tx {} failed", distribution.tx_hash))?;
        if check.exceeds_tolerance {
            debug!(
                project = check.project_id,
                tx = %check.tx_hash,
                fee_base = %check.fee_base,
                expected = %check.expected_fee,
                recorded = %check.recorded_fee,
                difference = %check.difference,
                "fee over tolerance"
            );
        }
    }

    info!(
        distributions = audit.distributions_checked,
        flagged_projects = audit.ledger.len(),
        "fee reconciliation complete"
    );
    Ok(audit)
}
