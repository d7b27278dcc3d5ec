use num_bigint::BigUint;

use crate::amount::Amount;

/// An integer share over an externally supplied denominator.
///
/// The denominator is not stored: split percents and fee rates use
/// different denominators, and those live in the reconciliation config.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u64);

impl Percentage {
    pub const fn new(numerator: u64) -> Self {
        Percentage(numerator)
    }

    pub const fn numerator(self) -> u64 {
        self.0
    }

    /// `floor(numerator * total / denominator)`.
    ///
    /// Returns `None` when `denominator` is zero.
    pub fn of(self, total: &Amount, denominator: u64) -> Option<Amount> {
        total.mul_div_floor(&BigUint::from(self.0), &BigUint::from(denominator))
    }
}
