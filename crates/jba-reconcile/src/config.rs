use jba_events::ProjectId;
use jba_numeric::Amount;

use crate::error::ReconcileError;

/// Denominator of split percents ("total possible percent").
pub const SPLITS_TOTAL_PERCENT: u64 = 1_000_000_000;

/// Project that receives protocol fees; its payments are not split recipients.
pub const PROTOCOL_PROJECT_ID: ProjectId = 1;

/// Fee numerator over [`FEE_DENOMINATOR`]: 2.5%.
pub const FEE_RATE: u64 = 25_000_000;

/// Fee denominator.
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

/// Allowed floor-division noise on recorded fees, in wei.
pub const FEE_TOLERANCE_WEI: u64 = 2;

/// Immutable constants for one reconciliation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub splits_total_percent: u64,
    pub protocol_project_id: ProjectId,
    pub fee_rate: u64,
    pub fee_denominator: u64,
    pub fee_tolerance: Amount,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            splits_total_percent: SPLITS_TOTAL_PERCENT,
            protocol_project_id: PROTOCOL_PROJECT_ID,
            fee_rate: FEE_RATE,
            fee_denominator: FEE_DENOMINATOR,
            fee_tolerance: Amount::from_wei(FEE_TOLERANCE_WEI),
        }
    }
}

impl ReconcileConfig {
    pub fn with_fee_tolerance(mut self, tolerance: Amount) -> Self {
        self.fee_tolerance = tolerance;
        self
    }

    /// Both denominators must be non-zero.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.splits_total_percent == 0 {
            return Err(ReconcileError::ZeroDenominator {
                name: "splits_total_percent",
            });
        }
        if self.fee_denominator == 0 {
            return Err(ReconcileError::ZeroDenominator {
                name: "fee_denominator",
            });
        }
        Ok(())
    }
}
