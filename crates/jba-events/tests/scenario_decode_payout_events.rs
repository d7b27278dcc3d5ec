//! Payout-pipeline decoding: string-encoded big integers become exact amounts,
//! and every decode failure names the offending field and raw value.

use jba_events::*;
use jba_numeric::{Amount, Percentage};

const BODY: &str = r#"{
  "data": {
    "distributePayoutsEvents": [
      {
        "distributedAmount": "123456789012345678901234567890",
        "splitDistributions": [
          { "percent": 500000000, "splitProjectId": 5 },
          { "percent": "250000000", "splitProjectId": 0 }
        ],
        "txHash": "0xabc"
      }
    ]
  }
}"#;

#[test]
fn payout_events_decode_with_exact_amounts() {
    let data = response_data(BODY).unwrap();
    let events = decode_distribution_events(&data, Pipeline::Payouts).unwrap();

    assert_eq!(events.len(), 1);
    let ev = &events[0];
    assert_eq!(ev.tx_hash, "0xabc");
    assert_eq!(
        ev.distributed_amount,
        Some(Amount::parse_dec("123456789012345678901234567890").unwrap())
    );
    assert_eq!(ev.fee, None);
    assert_eq!(ev.project_id, None);
    assert_eq!(
        ev.splits,
        vec![
            SplitEntry {
                split_project_id: 5,
                share: SplitShare::Percent(Percentage::new(500_000_000)),
            },
            SplitEntry::percent(0, 250_000_000),
        ]
    );
    assert!(ev.splits[1].is_external_wallet());
}

#[test]
fn invalid_amount_string_names_field_and_raw_value() {
    let body = r#"{"data":{"distributePayoutsEvents":[
        {"distributedAmount":"12e18","splitDistributions":[],"txHash":"0x1"}
    ]}}"#;
    let data = response_data(body).unwrap();
    let err = decode_distribution_events(&data, Pipeline::Payouts).unwrap_err();

    assert_eq!(
        err,
        DecodeError::InvalidInteger {
            path: "distributePayoutsEvents[0].distributedAmount".to_string(),
            raw: "12e18".to_string(),
        }
    );
    assert!(err.to_string().contains("distributedAmount"));
    assert!(err.to_string().contains("12e18"));
}

#[test]
fn error_path_includes_split_index() {
    let body = r#"{"data":{"distributePayoutsEvents":[
        {"distributedAmount":"1","txHash":"0x1","splitDistributions":[
            {"percent":1,"splitProjectId":2},
            {"splitProjectId":3}
        ]}
    ]}}"#;
    let data = response_data(body).unwrap();
    let err = decode_distribution_events(&data, Pipeline::Payouts).unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingField {
            path: "distributePayoutsEvents[0].splitDistributions[1].percent".to_string()
        }
    );
}

#[test]
fn payment_events_decode() {
    let body = r#"{"data":{"payEvents":[
        {"projectId":1,"amount":"25000000000000000"},
        {"projectId":5,"amount":"400000000000000000"}
    ]}}"#;
    let data = response_data(body).unwrap();
    let pays = decode_payment_events(&data).unwrap();
    assert_eq!(
        pays,
        vec![
            PaymentEvent::new(1, Amount::parse_dec("25000000000000000").unwrap()),
            PaymentEvent::new(5, Amount::parse_dec("400000000000000000").unwrap()),
        ]
    );
}

#[test]
fn payment_amount_with_sign_is_rejected() {
    let body = r#"{"data":{"payEvents":[{"projectId":5,"amount":"-4"}]}}"#;
    let data = response_data(body).unwrap();
    let err = decode_payment_events(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'payEvents[0].amount' is not a base-10 integer: '-4'"
    );
}

#[test]
fn missing_collection_is_an_error() {
    let data = response_data(r#"{"data":{}}"#).unwrap();
    assert_eq!(
        decode_payment_events(&data).unwrap_err(),
        DecodeError::MissingField {
            path: PAY_EVENTS_COLLECTION.to_string()
        }
    );
}

#[test]
fn empty_collections_decode_to_empty_vecs() {
    let data = response_data(r#"{"data":{"payEvents":[],"distributePayoutsEvents":[]}}"#).unwrap();
    assert!(decode_payment_events(&data).unwrap().is_empty());
    assert!(decode_distribution_events(&data, Pipeline::Payouts)
        .unwrap()
        .is_empty());
}
