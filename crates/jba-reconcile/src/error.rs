use std::fmt;

/// Fatal reconciliation errors.
///
/// These only occur when an event lacks what its pipeline needs, which
/// means the wrong decoder was used, or when the config is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A pipeline-specific field was not populated on the event.
    MissingField { tx_hash: String, field: &'static str },
    /// A split carried a percent where an amount was needed, or vice versa.
    UnexpectedSplitShare {
        tx_hash: String,
        index: usize,
        expected: &'static str,
    },
    /// A config denominator was zero.
    ZeroDenominator { name: &'static str },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::MissingField { tx_hash, field } => {
                write!(f, "distribution in tx {tx_hash} has no '{field}'")
            }
            ReconcileError::UnexpectedSplitShare {
                tx_hash,
                index,
                expected,
            } => write!(
                f,
                "distribution in tx {tx_hash}: split #{index} is not expressed as {expected}"
            ),
            ReconcileError::ZeroDenominator { name } => {
                write!(f, "reconcile config '{name}' must be non-zero")
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
