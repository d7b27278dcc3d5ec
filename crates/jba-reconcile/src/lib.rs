//! jba-reconcile
//!
//! Reconciliation engine for payout audits.
//!
//! Architectural decisions:
//! - Expected amounts are recomputed with exact floor division and compared
//!   to what downstream events actually observed.
//! - Underpayments are aggregated per project; overpayments and unknown
//!   recipients are surfaced as [`Anomaly`] values, never aggregated.
//! - Fee differences are flagged only when `recorded - expected` is strictly
//!   greater than the tolerance. The opposite sign is never flagged.
//! - Ledgers remember first-seen project order so reports are deterministic.
//! - Constants arrive through an immutable [`ReconcileConfig`].
//!
//! Deterministic, pure logic. No IO. No logging: callers decide what to do
//! with anomalies.

mod config;
mod engine;
mod error;
mod types;

pub use config::{
    ReconcileConfig, FEE_DENOMINATOR, FEE_RATE, FEE_TOLERANCE_WEI, PROTOCOL_PROJECT_ID,
    SPLITS_TOTAL_PERCENT,
};
pub use engine::{FeeCheck, ReconcileEngine};
pub use error::ReconcileError;
pub use types::*;
