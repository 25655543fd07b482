//! Randomized fee amount generation.
//!
//! The fee a client is asked to pay is the configured base amount scaled by
//! a uniformly random multiplier in [0.95, 1.10]. A fixed fee would let an
//! observer front-run the exact expected value; the randomized window makes
//! the expected amount unpredictable per request. The multiplier is an
//! integer numerator over a 1e10 denominator and the product is computed in
//! u128, so results are identical on every platform.

use rand::Rng;
use thiserror::Error;

use crate::config::schema::FeeConfig;
use crate::fee::amount::{format_kas, parse_kas, AmountError, MAX_KAS_DECIMALS};

/// Denominator of the rational multiplier (10 decimal digits of precision).
pub const MULTIPLIER_DENOMINATOR: u64 = 10_000_000_000;

/// Numerator lower bound, inclusive (0.95).
pub const MULTIPLIER_MIN: u64 = 9_500_000_000;

/// Numerator upper bound, inclusive (1.10).
pub const MULTIPLIER_MAX: u64 = 11_000_000_000;

/// Errors from fee generation.
#[derive(Debug, Error)]
pub enum FeeError {
    #[error("base fee amount is invalid: {0}")]
    Config(#[from] AmountError),

    #[error("randomized amount does not fit in the sompi range")]
    AmountOverflow,

    #[error("formatted amount '{0}' exceeds 8 fractional digits")]
    PrecisionOverflow(String),
}

/// A generated fee, in both raw sompi and decimal KAS form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuote {
    /// Fee amount in sompi.
    pub sompi: u64,
    /// The same amount as a decimal KAS string, at most 8 fractional digits.
    pub kas: String,
}

/// Generates randomized fee amounts from an immutable base configuration.
///
/// The base amount is parsed and validated once at construction; generation
/// itself cannot fail on configuration afterwards.
pub struct FeeGenerator {
    base_sompi: u64,
    fee_wallet: String,
}

impl FeeGenerator {
    /// Validate the fee configuration and build a generator from it.
    pub fn new(config: &FeeConfig) -> Result<Self, FeeError> {
        let base_sompi = parse_kas(&config.base_amount_kas)?;
        Ok(Self {
            base_sompi,
            fee_wallet: config.fee_wallet.clone(),
        })
    }

    /// Address the fee payment is expected at.
    pub fn fee_wallet(&self) -> &str {
        &self.fee_wallet
    }

    /// Generate a fee with a fresh random multiplier.
    pub fn quote(&self) -> Result<FeeQuote, FeeError> {
        let numerator = rand::thread_rng().gen_range(MULTIPLIER_MIN..=MULTIPLIER_MAX);
        self.quote_with_numerator(numerator)
    }

    /// Generate the fee for a fixed multiplier numerator.
    ///
    /// `floor(base_sompi * numerator / 1e10)`, in integer arithmetic only.
    fn quote_with_numerator(&self, numerator: u64) -> Result<FeeQuote, FeeError> {
        let product = self.base_sompi as u128 * numerator as u128;
        let sompi = u64::try_from(product / MULTIPLIER_DENOMINATOR as u128)
            .map_err(|_| FeeError::AmountOverflow)?;

        let kas = format_kas(sompi);
        // Unreachable given the integer derivation, but a violation must
        // surface as an error rather than a silently truncated amount.
        if let Some((_, frac)) = kas.split_once('.') {
            if frac.len() > MAX_KAS_DECIMALS {
                return Err(FeeError::PrecisionOverflow(kas));
            }
        }

        Ok(FeeQuote { sompi, kas })
    }
}

impl std::fmt::Debug for FeeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeGenerator")
            .field("base_sompi", &self.base_sompi)
            .field("fee_wallet", &self.fee_wallet)
            .finish()
    }
}
