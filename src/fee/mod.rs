//! Fee amount generation subsystem.
//!
//! All currency values are integer sompi counts; the only decimal
//! representations are the human-entered config string and the formatted
//! response string. Floating point is never used, so conversions are
//! deterministic across platforms.

pub mod amount;
pub mod generator;

pub use amount::{format_kas, parse_kas, AmountError, SOMPI_PER_KAS};
pub use generator::{FeeError, FeeGenerator, FeeQuote};
