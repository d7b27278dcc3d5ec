use anyhow::{Context, Result};
use jba_events::{decode_distribution_events, decode_payment_events, Pipeline, ProjectId};
use jba_reconcile::{PayoutAudit, ReconcileEngine};
use jba_subgraph::{queries, SubgraphClient};
use tracing::{debug, info, warn};

use crate::fetch_data;

/// Split-vs-payment audit of every payout distribution of `source_project`.
///
/// Issues one distribution query, then one payment query per distribution.
/// Anomalies are logged at `warn` as they are found and kept on the result.
pub async fn run_payout_audit(
    client: &dyn SubgraphClient,
    engine: &ReconcileEngine,
    source_project: ProjectId,
) -> Result<PayoutAudit> {
    let data = fetch_data(
        client,
        &queries::distribute_payouts_query(source_project),
        "distribute payouts events",
    )
    .await?;
    let distributions = decode_distribution_events(&data, Pipeline::Payouts)
        .context("decode distribute payouts events failed")?;
    info!(
        source_project,
        count = distributions.len(),
        "distribution events fetched"
    );

    let mut audit = PayoutAudit::new();
    for distribution in &distributions {
        let tx = distribution.tx_hash.as_str();
        debug!(tx, "fetching pay events");

        let data = fetch_data(
            client,
            &queries::pay_events_query(tx),
            &format!("pay events for tx {tx}"),
        )
        .await?;
        let payments = decode_payment_events(&data)
            .with_context(|| format!("decode pay events for tx {tx} failed"))?;

        let seen = audit.anomalies.len();
        engine
            .reconcile_payouts(distribution, &payments, &mut audit)
            .with_context(|| format!("reconcile tx {tx} failed"))?;
        for anomaly in &audit.anomalies[seen..] {
            warn!("{anomaly}");
        }
    }

    info!(
        distributions = audit.distributions_checked,
        payments = audit.payments_checked,
        underpaid_projects = audit.ledger.len(),
        anomalies = audit.anomalies.len(),
        total_underpaid = %audit.ledger.grand_total().to_eth_string(),
        "payout reconciliation complete"
    );
    Ok(audit)
}
