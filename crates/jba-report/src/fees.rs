use jba_reconcile::{FeeShortfall, FeeShortfallLedger};

/// `Project #3: fees exceed expected by 0.00000000000000001 ETH (10 wei) across 1 tx(s)`
pub fn fee_shortfall_line(s: &FeeShortfall) -> String {
    format!(
        "Project #{}: fees exceed expected by {} ({} wei) across {} tx(s)",
        s.project_id,
        s.total.to_eth_string(),
        s.total,
        s.count
    )
}

/// One line per flagged project, in first-seen order.
pub fn fee_shortfall_lines(ledger: &FeeShortfallLedger) -> Vec<String> {
    ledger.iter().map(fee_shortfall_line).collect()
}
