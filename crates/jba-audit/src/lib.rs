//! jba-audit
//!
//! Pipeline drivers: fetch -> decode -> reconcile.
//!
//! Strictly sequential. Every query is awaited before the next is issued,
//! and the first transport, decode or reconcile error aborts the run with
//! nothing emitted. Rendering and file output belong to the caller.

mod fees;
mod payouts;

pub use fees::run_fee_audit;
pub use payouts::run_payout_audit;

use anyhow::{Context, Result};
use jba_subgraph::SubgraphClient;
use serde_json::Value;

/// Project whose payout distributions the payout pipeline audits.
pub const DEFAULT_SOURCE_PROJECT_ID: u64 = 1;

/// Send one query and unwrap its `data` object.
async fn fetch_data(client: &dyn SubgraphClient, query: &str, what: &str) -> Result<Value> {
    let body = client
        .query(query)
        .await
        .with_context(|| format!("query {what} failed"))?;
    jba_events::response_data(&body).with_context(|| format!("decode {what} response failed"))
}
