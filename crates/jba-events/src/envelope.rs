use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Parse a raw response body and return its `data` object.
///
/// A non-empty `errors` array is fatal even when partial `data` is present.
pub fn response_data(body: &str) -> Result<Value, DecodeError> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(body).map_err(|e| DecodeError::MalformedJson(e.to_string()))?;

    let errors = envelope.errors.unwrap_or_default();
    if !errors.is_empty() {
        return Err(DecodeError::QueryRejected {
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    match envelope.data {
        Some(data @ Value::Object(_)) => Ok(data),
        Some(_) => Err(DecodeError::wrong_type("data", "object")),
        None => Err(DecodeError::missing("data")),
    }
}
