//! jba-events
//!
//! Typed indexer events and the decoder that produces them.
//!
//! The indexer answers with `{"data": {...}}` where every large integer is a
//! decimal string. This crate turns that payload into [`DistributionEvent`],
//! [`SplitEntry`] and [`PaymentEvent`] values holding exact [`Amount`]s.
//!
//! It does **not**:
//! - talk to the network (that is `jba-subgraph`)
//! - check business invariants such as percents summing to the denominator
//!
//! [`Amount`]: jba_numeric::Amount

mod decode;
mod envelope;
mod error;
mod types;

pub use decode::{decode_distribution_events, decode_payment_events, Pipeline};
pub use envelope::response_data;
pub use error::DecodeError;
pub use types::{
    DistributionEvent, PaymentEvent, ProjectId, SplitEntry, SplitShare,
    EXTERNAL_WALLET_PROJECT_ID,
};

/// Collection name of payout distribution events in the indexer schema.
pub const DISTRIBUTE_PAYOUTS_COLLECTION: &str = "distributePayoutsEvents";

/// Collection name of payment events in the indexer schema.
pub const PAY_EVENTS_COLLECTION: &str = "payEvents";
