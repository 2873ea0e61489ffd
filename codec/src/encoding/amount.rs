//! Fixed-point amounts.
//!
//! The wire schema stores every amount as an `int64` count of stroops,
//! 10^-7 of a unit. The text form shows the integer (authoritative) and a
//! decimal rendering (informational). No floating point is involved in
//! either direction.

use thiserror::Error;

use crate::config::{AMOUNT_DECIMALS, STROOPS_PER_UNIT};

/// Errors from parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing to parse.
    #[error("empty amount")]
    Empty,

    /// A character other than digits, one `.` and a leading `-`.
    #[error("invalid character in amount")]
    InvalidDigit,

    /// More than seven digits after the decimal point.
    #[error("more than 7 fractional digits")]
    TooManyDecimals,

    /// The stroop count does not fit in an `i64`.
    #[error("amount out of range")]
    Overflow,
}

/// Render a stroop count as a decimal with exactly seven fractional digits.
///
/// `1_000_000_000` becomes `"100.0000000"`; `-5` becomes `"-0.0000005"`.
pub fn format_stroops(stroops: i64) -> String {
    let sign = if stroops < 0 { "-" } else { "" };
    let magnitude = stroops.unsigned_abs();
    let unit = STROOPS_PER_UNIT as u64;
    format!(
        "{}{}.{:0>width$}",
        sign,
        magnitude / unit,
        magnitude % unit,
        width = AMOUNT_DECIMALS
    )
}

/// Parse a decimal amount (`"100"`, `"40.0004"`, `"-0.5"`) into stroops.
pub fn parse_amount(s: &str) -> Result<i64, AmountError> {
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Empty);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountError::InvalidDigit);
    }
    if frac.len() > AMOUNT_DECIMALS {
        return Err(AmountError::TooManyDecimals);
    }

    let mut value: i128 = 0;
    for b in whole.bytes() {
        value = value * 10 + (b - b'0') as i128;
        if value > i64::MAX as i128 + 1 {
            return Err(AmountError::Overflow);
        }
    }
    value *= STROOPS_PER_UNIT as i128;
    let mut scale = STROOPS_PER_UNIT as i128;
    for b in frac.bytes() {
        scale /= 10;
        value += (b - b'0') as i128 * scale;
    }
    if negative {
        value = -value;
    }
    i64::try_from(value).map_err(|_| AmountError::Overflow)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
