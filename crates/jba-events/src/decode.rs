//! Per-pipeline event decoding.
//!
//! Both pipelines read `distributePayoutsEvents` but select different field
//! subsets, so the decoder is parametrized by [`Pipeline`] and only requires
//! the fields that pipeline's query asked for.

use jba_numeric::{Amount, Percentage};
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::types::{DistributionEvent, PaymentEvent, ProjectId, SplitEntry, SplitShare};
use crate::{DISTRIBUTE_PAYOUTS_COLLECTION, PAY_EVENTS_COLLECTION};

/// Which reconciliation the decoded events feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Split percentages vs. downstream payments.
    Payouts,
    /// Recorded fee vs. fee recomputed from the fee base.
    Fees,
}

/// Decode `data.distributePayoutsEvents`.
pub fn decode_distribution_events(
    data: &Value,
    pipeline: Pipeline,
) -> Result<Vec<DistributionEvent>, DecodeError> {
    let items = collection(data, DISTRIBUTE_PAYOUTS_COLLECTION)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("{DISTRIBUTE_PAYOUTS_COLLECTION}[{i}]");
            decode_distribution(item, &path, pipeline)
        })
        .collect()
}

/// Decode `data.payEvents`.
pub fn decode_payment_events(data: &Value) -> Result<Vec<PaymentEvent>, DecodeError> {
    let items = collection(data, PAY_EVENTS_COLLECTION)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("{PAY_EVENTS_COLLECTION}[{i}]");
            let obj = as_object(item, &path)?;
            Ok(PaymentEvent {
                project_id: integer_field(obj, &path, "projectId")?,
                amount: amount_field(obj, &path, "amount")?,
            })
        })
        .collect()
}

fn decode_distribution(
    item: &Value,
    path: &str,
    pipeline: Pipeline,
) -> Result<DistributionEvent, DecodeError> {
    let obj = as_object(item, path)?;
    let tx_hash = string_field(obj, path, "txHash")?;

    let splits_path = format!("{path}.splitDistributions");
    let raw_splits = match obj.get("splitDistributions") {
        None | Some(Value::Null) => return Err(DecodeError::missing(&splits_path)),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DecodeError::wrong_type(&splits_path, "array")),
    };

    let mut splits = Vec::with_capacity(raw_splits.len());
    for (i, raw) in raw_splits.iter().enumerate() {
        let split_path = format!("{splits_path}[{i}]");
        splits.push(decode_split(raw, &split_path, pipeline)?);
    }

    match pipeline {
        Pipeline::Payouts => Ok(DistributionEvent {
            tx_hash,
            project_id: None,
            distributed_amount: Some(amount_field(obj, path, "distributedAmount")?),
            fee: None,
            beneficiary_distribution_amount: None,
            splits,
        }),
        Pipeline::Fees => Ok(DistributionEvent {
            tx_hash,
            project_id: Some(integer_field(obj, path, "projectId")?),
            distributed_amount: None,
            fee: Some(amount_field(obj, path, "fee")?),
            beneficiary_distribution_amount: Some(amount_field(
                obj,
                path,
                "beneficiaryDistributionAmount",
            )?),
            splits,
        }),
    }
}

fn decode_split(raw: &Value, path: &str, pipeline: Pipeline) -> Result<SplitEntry, DecodeError> {
    let obj = as_object(raw, path)?;
    let split_project_id: ProjectId = integer_field(obj, path, "splitProjectId")?;
    let share = match pipeline {
        Pipeline::Payouts => {
            SplitShare::Percent(Percentage::new(integer_field(obj, path, "percent")?))
        }
        Pipeline::Fees => SplitShare::Amount(amount_field(obj, path, "amount")?),
    };
    Ok(SplitEntry {
        split_project_id,
        share,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn collection<'a>(data: &'a Value, name: &str) -> Result<&'a Vec<Value>, DecodeError> {
    match data.get(name) {
        None | Some(Value::Null) => Err(DecodeError::missing(name)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(DecodeError::wrong_type(name, "array")),
    }
}

fn as_object<'a>(v: &'a Value, path: &str) -> Result<&'a Map<String, Value>, DecodeError> {
    v.as_object()
        .ok_or_else(|| DecodeError::wrong_type(path, "object"))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    name: &str,
) -> Result<&'a Value, DecodeError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(DecodeError::missing(&format!("{path}.{name}"))),
        Some(v) => Ok(v),
    }
}

fn string_field(obj: &Map<String, Value>, path: &str, name: &str) -> Result<String, DecodeError> {
    required(obj, path, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::wrong_type(&format!("{path}.{name}"), "string"))
}

/// Exact wei amount. The wire format is a decimal string; a plain JSON
/// integer is accepted too when it fits `u64`.
fn amount_field(obj: &Map<String, Value>, path: &str, name: &str) -> Result<Amount, DecodeError> {
    let field_path = format!("{path}.{name}");
    match required(obj, path, name)? {
        Value::String(s) => {
            Amount::parse_dec(s).map_err(|_| DecodeError::invalid_integer(&field_path, s.as_str()))
        }
        Value::Number(n) => n
            .as_u64()
            .map(Amount::from_wei)
            .ok_or_else(|| DecodeError::invalid_integer(&field_path, n.to_string())),
        _ => Err(DecodeError::wrong_type(&field_path, "decimal string")),
    }
}

/// Small integer (ids, percent numerators): JSON integer or decimal string.
fn integer_field(obj: &Map<String, Value>, path: &str, name: &str) -> Result<u64, DecodeError> {
    let field_path = format!("{path}.{name}");
    match required(obj, path, name)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| DecodeError::invalid_integer(&field_path, n.to_string())),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse::<u64>()
            .map_err(|_| DecodeError::invalid_integer(&field_path, s.as_str())),
        Value::String(s) => Err(DecodeError::invalid_integer(&field_path, s.as_str())),
        _ => Err(DecodeError::wrong_type(&field_path, "integer")),
    }
}
