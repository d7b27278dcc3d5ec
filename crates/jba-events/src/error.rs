use std::fmt;

/// Errors produced while decoding an indexer response.
///
/// `path` is the full location of the offending field, including list
/// indices, e.g. `distributePayoutsEvents[3].splitDistributions[0].percent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Body was not valid JSON, or not shaped like a response envelope.
    MalformedJson(String),
    /// The indexer answered with GraphQL errors instead of data.
    QueryRejected { messages: Vec<String> },
    /// A required field was absent (or `null`).
    MissingField { path: String },
    /// A field had the wrong JSON type.
    WrongType { path: String, expected: &'static str },
    /// A numeric field was not a valid base-10 unsigned integer.
    InvalidInteger { path: String, raw: String },
}

impl DecodeError {
    pub(crate) fn missing(path: &str) -> Self {
        DecodeError::MissingField {
            path: path.to_string(),
        }
    }

    pub(crate) fn wrong_type(path: &str, expected: &'static str) -> Self {
        DecodeError::WrongType {
            path: path.to_string(),
            expected,
        }
    }

    pub(crate) fn invalid_integer(path: &str, raw: impl Into<String>) -> Self {
        DecodeError::InvalidInteger {
            path: path.to_string(),
            raw: raw.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedJson(msg) => write!(f, "malformed response json: {msg}"),
            DecodeError::QueryRejected { messages } => {
                write!(f, "query rejected by indexer: {}", messages.join("; "))
            }
            DecodeError::MissingField { path } => write!(f, "field '{path}' is missing"),
            DecodeError::WrongType { path, expected } => {
                write!(f, "field '{path}' has wrong type (expected {expected})")
            }
            DecodeError::InvalidInteger { path, raw } => {
                write!(f, "field '{path}' is not a base-10 integer: '{raw}'")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
