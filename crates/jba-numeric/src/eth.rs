//! Decimal rendering at a fixed implicit scale.

use num_bigint::BigUint;

use crate::amount::{Amount, ParseAmountError};

/// Wei per ETH is 10^18.
pub const ETH_DECIMALS: usize = 18;

/// Render `value / 10^decimals` as the shortest exact decimal string.
///
/// Works on the base-10 digit string directly, so no precision is lost for
/// any magnitude. Trailing fractional zeros (and a bare `.`) are dropped.
pub fn format_units(value: &BigUint, decimals: usize) -> String {
    let digits = value.to_str_radix(10);
    if decimals == 0 {
        return digits;
    }

    // Left-pad so there is at least one integer digit.
    let padded = if digits.len() <= decimals {
        let mut s = "0".repeat(decimals + 1 - digits.len());
        s.push_str(&digits);
        s
    } else {
        digits
    };

    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Inverse of [`Amount::to_eth_string`]: `"1.5 ETH"` -> 1500000000000000000 wei.
///
/// The ` ETH` suffix is optional.
pub fn parse_eth_digits(s: &str) -> Result<Amount, ParseAmountError> {
    let s = s.strip_suffix(" ETH").unwrap_or(s);
    if s.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if int_part.is_empty() {
        return Err(ParseAmountError::InvalidDigit { raw: s.to_string() });
    }
    if frac_part.len() > ETH_DECIMALS {
        return Err(ParseAmountError::TooManyDecimalPlaces { raw: s.to_string() });
    }

    let mut digits = String::with_capacity(int_part.len() + ETH_DECIMALS);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.push_str(&"0".repeat(ETH_DECIMALS - frac_part.len()));

    Amount::parse_dec(&digits).map_err(|_| ParseAmountError::InvalidDigit { raw: s.to_string() })
}
