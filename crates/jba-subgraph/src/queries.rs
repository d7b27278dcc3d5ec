//! Fixed GraphQL queries sent verbatim to the indexer.

/// Page size for every query. Only the first page is ever read.
pub const PAGE_SIZE: u32 = 1000;

/// Payout distributions of `source_project`, with split percents.
pub fn distribute_payouts_query(source_project: u64) -> String {
    format!(
        r#"{{
  distributePayoutsEvents(
    first: {PAGE_SIZE}
    where: {{projectId: {source_project}}}
  ) {{
    distributedAmount
    splitDistributions {{
      percent
      splitProjectId
    }}
    txHash
  }}
}}"#
    )
}

/// Payment events emitted in transaction `tx_hash`.
pub fn pay_events_query(tx_hash: &str) -> String {
    format!(
        r#"{{
  payEvents(
    first: {PAGE_SIZE}
    where: {{txHash: "{}"}}
  ) {{
    projectId
    amount
  }}
}}"#,
        escape_graphql_string(tx_hash)
    )
}

/// Payout distributions carrying recorded fees and fee-base components.
pub fn fee_distributions_query() -> String {
    format!(
        r#"{{
  distributePayoutsEvents(
    first: {PAGE_SIZE}
  ) {{
    projectId
    fee
    beneficiaryDistributionAmount
    splitDistributions {{
      splitProjectId
      amount
    }}
    txHash
  }}
}}"#
    )
}

/// Escape `"` and `\` for a GraphQL string literal.
fn escape_graphql_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payouts_query_filters_source_project() {
        let q = distribute_payouts_query(1);
        assert!(q.contains("first: 1000"));
        assert!(q.contains("where: {projectId: 1}"));
        assert!(q.contains("percent"));
        assert!(q.contains("splitProjectId"));
        assert!(q.starts_with('{') && q.ends_with('}'));
    }

    #[test]
    fn pay_events_query_embeds_tx_hash() {
        let q = pay_events_query("0xdeadbeef");
        assert!(q.contains(r#"where: {txHash: "0xdeadbeef"}"#));
        assert!(q.contains("projectId"));
        assert!(q.contains("amount"));
    }

    #[test]
    fn pay_events_query_escapes_quotes() {
        let q = pay_events_query(r#"0x"} evil {"#);
        assert!(q.contains(r#"txHash: "0x\"} evil {""#));
    }

    #[test]
    fn fee_query_selects_fee_fields() {
        let q = fee_distributions_query();
        for field in ["projectId", "fee", "beneficiaryDistributionAmount", "amount", "txHash"] {
            assert!(q.contains(field), "{field}");
        }
        assert!(!q.contains("where"));
    }
}
