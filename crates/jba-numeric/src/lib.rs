//! jba-numeric
//!
//! Exact-precision amounts for payout auditing.
//!
//! Architectural decisions:
//! - Every on-chain quantity is an [`Amount`] of wei backed by an unbounded
//!   integer; products of amount × percent routinely exceed `u128`.
//! - Division is floor division, matching the on-chain computation.
//! - No binary floating point anywhere. The ETH rendering is decimal string
//!   shifting, so it is exact for every input.
//!
//! Pure logic. No IO.

mod amount;
mod eth;
mod percentage;

pub use amount::{Amount, ParseAmountError, SignedAmount};
pub use eth::{format_units, parse_eth_digits, ETH_DECIMALS};
pub use percentage::Percentage;
