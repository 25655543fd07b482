//! Fixed-point KAS/sompi conversions.
//!
//! 1 KAS = 100,000,000 sompi. Amounts are `u64` sompi counts everywhere;
//! decimal KAS strings exist only at the config and response boundaries and
//! are converted with exact integer scaling, never through a float.

use thiserror::Error;

/// Number of sompi in one whole KAS.
pub const SOMPI_PER_KAS: u64 = 100_000_000;

/// Maximum fractional digits a KAS amount may carry.
pub const MAX_KAS_DECIMALS: usize = 8;

/// Errors from parsing a decimal KAS string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount '{0}' is not a decimal number")]
    Malformed(String),

    #[error("amount has {0} fractional digits, more than the allowed 8")]
    TooManyDecimals(usize),

    #[error("amount must be greater than zero")]
    Zero,

    #[error("amount does not fit in the sompi range")]
    Overflow,
}

/// Parse a decimal KAS string (e.g., "10" or "0.5") into sompi.
///
/// The string is split at the decimal point and scaled with integer
/// arithmetic, so values like "0.1" convert exactly. At most 8 fractional
/// digits are accepted; the result must be a positive sompi count.
pub fn parse_kas(s: &str) -> Result<u64, AmountError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountError::Malformed(s.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Malformed(s.to_string()));
    }
    if frac.len() > MAX_KAS_DECIMALS {
        return Err(AmountError::TooManyDecimals(frac.len()));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };
    let frac_sompi: u64 = if frac.is_empty() {
        0
    } else {
        let digits: u64 = frac.parse().map_err(|_| AmountError::Overflow)?;
        digits * 10u64.pow((MAX_KAS_DECIMALS - frac.len()) as u32)
    };

    let sompi = whole
        .checked_mul(SOMPI_PER_KAS)
        .and_then(|w| w.checked_add(frac_sompi))
        .ok_or(AmountError::Overflow)?;

    if sompi == 0 {
        return Err(AmountError::Zero);
    }
    Ok(sompi)
}

/// Format a sompi count as a decimal KAS string with trailing zeros trimmed.
///
/// The fractional part is at most 8 digits by construction.
pub fn format_kas(sompi: u64) -> String {
    let whole = sompi / SOMPI_PER_KAS;
    let frac = sompi % SOMPI_PER_KAS;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:08}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
