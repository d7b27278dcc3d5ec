//! Wei amount newtype.
//!
//! `Amount` wraps a [`BigUint`] so the type system keeps wei values apart
//! from project ids, percent numerators and other plain integers. There is
//! intentionally no `From<u64>`; use [`Amount::from_wei`] so construction
//! from a raw integer is always deliberate.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::eth;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when parsing a decimal integer string into an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The input string was empty.
    Empty,
    /// The input contained something other than ASCII digits.
    InvalidDigit { raw: String },
    /// A decimal rendering had more fractional digits than the unit allows.
    TooManyDecimalPlaces { raw: String },
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount string is empty"),
            ParseAmountError::InvalidDigit { raw } => {
                write!(f, "amount is not a base-10 unsigned integer: '{raw}'")
            }
            ParseAmountError::TooManyDecimalPlaces { raw } => {
                write!(
                    f,
                    "amount has more than {} decimal places: '{raw}'",
                    eth::ETH_DECIMALS
                )
            }
        }
    }
}

impl std::error::Error for ParseAmountError {}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative quantity of wei with no upper bound.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    /// Zero wei.
    pub fn zero() -> Self {
        Amount(BigUint::zero())
    }

    /// Construct from a raw wei count.
    pub fn from_wei(wei: u64) -> Self {
        Amount(BigUint::from(wei))
    }

    /// Construct from a raw wei count that may exceed `u64`.
    pub fn from_wei_u128(wei: u128) -> Self {
        Amount(BigUint::from(wei))
    }

    /// Wrap an existing big integer.
    pub fn from_biguint(v: BigUint) -> Self {
        Amount(v)
    }

    /// Borrow the underlying big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Parse a base-10 integer string.
    ///
    /// Strict: only ASCII digits are accepted. No sign, no whitespace, no
    /// `_` separators, no fractional part.
    pub fn parse_dec(s: &str) -> Result<Self, ParseAmountError> {
        if s.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::InvalidDigit { raw: s.to_string() });
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Amount)
            .ok_or_else(|| ParseAmountError::InvalidDigit { raw: s.to_string() })
    }

    /// `|self - rhs|`.
    pub fn abs_diff(&self, rhs: &Amount) -> Amount {
        match self.0.cmp(&rhs.0) {
            Ordering::Less => Amount(&rhs.0 - &self.0),
            _ => Amount(&self.0 - &rhs.0),
        }
    }

    /// Signed difference `self - rhs`.
    pub fn signed_sub(&self, rhs: &Amount) -> SignedAmount {
        SignedAmount(BigInt::from(self.0.clone()) - BigInt::from(rhs.0.clone()))
    }

    /// `floor(self * numerator / denominator)`.
    ///
    /// Returns `None` when `denominator` is zero.
    pub fn mul_div_floor(&self, numerator: &BigUint, denominator: &BigUint) -> Option<Amount> {
        if denominator.is_zero() {
            return None;
        }
        // BigUint division truncates, which is floor for non-negative operands.
        Some(Amount(&self.0 * numerator / denominator))
    }

    /// Human-readable ETH string, e.g. `1500000000000000000` -> `"1.5 ETH"`.
    ///
    /// Shortest exact decimal: trailing fractional zeros are dropped, no
    /// digit is ever rounded.
    pub fn to_eth_string(&self) -> String {
        format!("{} ETH", eth::format_units(&self.0, eth::ETH_DECIMALS))
    }
}

impl fmt::Display for Amount {
    /// Raw wei digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse_dec(s)
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Amount> for &'a Amount {
    type Output = Amount;
    fn add(self, rhs: &'a Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

// ---------------------------------------------------------------------------
// SignedAmount
// ---------------------------------------------------------------------------

/// A signed wei difference. Only produced by [`Amount::signed_sub`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedAmount(BigInt);

impl SignedAmount {
    /// Strictly greater than a non-negative bound.
    pub fn exceeds(&self, bound: &Amount) -> bool {
        self.0 > BigInt::from(bound.0.clone())
    }

    /// The magnitude, when the difference is non-negative.
    pub fn to_amount(&self) -> Option<Amount> {
        self.0.to_biguint().map(Amount)
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
