//! Both pipelines driven end to end against an in-process mock indexer.
//!
//! GREEN when:
//! - the payout pipeline queries distributions once, then pay events once
//!   per distribution, in order
//! - underpayments aggregate across distributions; protocol fees are ignored
//! - any decode or transport failure aborts the run
//! - the fee pipeline flags only shortfalls strictly above tolerance

use std::sync::Mutex;

use jba_audit::{run_fee_audit, run_payout_audit, DEFAULT_SOURCE_PROJECT_ID};
use jba_numeric::Amount;
use jba_reconcile::{Anomaly, ReconcileConfig, ReconcileEngine};
use jba_subgraph::{SubgraphClient, TransportError};

/// Answers by matching a substring of the query; records every query sent.
struct MockSubgraph {
    routes: Vec<(&'static str, String)>,
    sent: Mutex<Vec<String>>,
}

impl MockSubgraph {
    fn new(routes: Vec<(&'static str, String)>) -> Self {
        Self {
            routes,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SubgraphClient for MockSubgraph {
    async fn query(&self, query: &str) -> Result<String, TransportError> {
        self.sent.lock().unwrap().push(query.to_string());
        self.routes
            .iter()
            .find(|(needle, _)| query.contains(needle))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| TransportError::Request("no route".to_string()))
    }
}

fn engine() -> ReconcileEngine {
    ReconcileEngine::new(ReconcileConfig::default()).unwrap()
}

const DISTRIBUTIONS: &str = r#"{"data":{"distributePayoutsEvents":[
  {"distributedAmount":"1000000000000000000","txHash":"0xaaa",
   "splitDistributions":[{"percent":500000000,"splitProjectId":5},{"percent":200000000,"splitProjectId":0}]},
  {"distributedAmount":"2000000000000000000","txHash":"0xbbb",
   "splitDistributions":[{"percent":500000000,"splitProjectId":5},{"percent":100000000,"splitProjectId":9}]}
]}}"#;

const PAYS_AAA: &str = r#"{"data":{"payEvents":[
  {"projectId":1,"amount":"25000000000000000"},
  {"projectId":5,"amount":"400000000000000000"}
]}}"#;

const PAYS_BBB: &str = r#"{"data":{"payEvents":[
  {"projectId":5,"amount":"1000000000000000000"},
  {"projectId":9,"amount":"300000000000000000"},
  {"projectId":42,"amount":"1"}
]}}"#;

fn payout_routes() -> Vec<(&'static str, String)> {
    vec![
        ("distributePayoutsEvents", DISTRIBUTIONS.to_string()),
        (r#"txHash: "0xaaa""#, PAYS_AAA.to_string()),
        (r#"txHash: "0xbbb""#, PAYS_BBB.to_string()),
    ]
}

#[tokio::test]
async fn payout_pipeline_aggregates_underpayments() {
    let mock = MockSubgraph::new(payout_routes());
    let audit = run_payout_audit(&mock, &engine(), DEFAULT_SOURCE_PROJECT_ID)
        .await
        .unwrap();

    // Only project 5 in tx 0xaaa is underpaid (0.5 expected, 0.4 received).
    assert_eq!(audit.ledger.project_ids(), &[5]);
    let p5 = audit.ledger.get(5).unwrap();
    assert_eq!(p5.total.to_eth_string(), "0.1 ETH");
    assert_eq!(p5.discrepancies[0].tx_hash, "0xaaa");

    // Project 9 overpaid (0.2 expected, 0.3 received); project 42 unexpected.
    assert_eq!(audit.anomalies.len(), 2);
    assert!(matches!(audit.anomalies[0], Anomaly::Overpayment { project_id: 9, .. }));
    assert!(matches!(
        audit.anomalies[1],
        Anomaly::UnexpectedRecipient { project_id: 42, .. }
    ));
    assert_eq!(audit.distributions_checked, 2);

    let sent = mock.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].contains("where: {projectId: 1}"));
    assert!(sent[1].contains("0xaaa"));
    assert!(sent[2].contains("0xbbb"));
}

#[tokio::test]
async fn payout_pipeline_is_idempotent() {
    let a = run_payout_audit(&MockSubgraph::new(payout_routes()), &engine(), 1)
        .await
        .unwrap();
    let b = run_payout_audit(&MockSubgraph::new(payout_routes()), &engine(), 1)
        .await
        .unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn decode_failure_in_pay_events_aborts_run() {
    let mut routes = payout_routes();
    routes[2].1 = r#"{"data":{"payEvents":[{"projectId":5,"amount":"1.5"}]}}"#.to_string();
    let mock = MockSubgraph::new(routes);

    let err = run_payout_audit(&mock, &engine(), 1).await.unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("payEvents[0].amount"), "{msg}");
    assert!(msg.contains("'1.5'"), "{msg}");
}

#[tokio::test]
async fn transport_failure_aborts_before_reconciling() {
    let mock = MockSubgraph::new(vec![("distributePayoutsEvents", DISTRIBUTIONS.to_string())]);
    let err = run_payout_audit(&mock, &engine(), 1).await.unwrap_err();
    assert!(format!("{err:#}").contains("query pay events for tx 0xaaa failed"));
    // Stopped at the first failing correlation query.
    assert_eq!(mock.sent().len(), 2);
}

#[tokio::test]
async fn graphql_errors_are_fatal() {
    let mock = MockSubgraph::new(vec![(
        "distributePayoutsEvents",
        r#"{"errors":[{"message":"indexing_error"}]}"#.to_string(),
    )]);
    let err = run_payout_audit(&mock, &engine(), 1).await.unwrap_err();
    assert!(format!("{err:#}").contains("indexing_error"));
}

const FEE_DISTRIBUTIONS: &str = r#"{"data":{"distributePayoutsEvents":[
  {"projectId":3,"fee":"25001","beneficiaryDistributionAmount":"1000000","txHash":"0x1","splitDistributions":[]},
  {"projectId":3,"fee":"25010","beneficiaryDistributionAmount":"1000000","txHash":"0x2","splitDistributions":[]},
  {"projectId":7,"fee":"25010","beneficiaryDistributionAmount":"0","txHash":"0x3",
   "splitDistributions":[{"splitProjectId":0,"amount":"1000000"},{"splitProjectId":4,"amount":"999"}]}
]}}"#;

#[tokio::test]
async fn fee_pipeline_flags_shortfalls_above_tolerance() {
    let mock = MockSubgraph::new(vec![("distributePayoutsEvents", FEE_DISTRIBUTIONS.to_string())]);
    let audit = run_fee_audit(&mock, &engine()).await.unwrap();

    assert_eq!(audit.distributions_checked, 3);
    let order: Vec<_> = audit.ledger.iter().map(|s| s.project_id).collect();
    assert_eq!(order, vec![3, 7]);

    let p3 = audit.ledger.get(3).unwrap();
    assert_eq!((p3.total.clone(), p3.count), (Amount::from_wei(10), 1));
    let p7 = audit.ledger.get(7).unwrap();
    assert_eq!((p7.total.clone(), p7.count), (Amount::from_wei(10), 1));

    let sent = mock.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("beneficiaryDistributionAmount"));
}
