//! Exact textual numbers used by the batch auction interchange format.
//!
//! JSON numbers can't carry 256-bit token amounts or arbitrary precision
//! fractions without loss, so these values travel as decimal strings. This
//! crate is the single place where such strings are converted to numbers and
//! back; nothing above it inspects raw numeric text.

mod bigint;
mod decimal;
pub mod serialization;

pub use self::{bigint::BigInt, decimal::Decimal};

/// Reasons a numeric string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed number")]
    Malformed,
    #[error("number exceeds the configured digit bound")]
    TooLarge,
}

/// Upper bounds on the textual length of parsed numbers.
///
/// Arbitrary precision numbers allocate proportionally to their digit count,
/// so hostile input has to be rejected before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of digits of a [`BigInt`].
    pub max_bigint_digits: usize,
    /// Maximum number of digits before the decimal point of a [`Decimal`].
    pub max_decimal_integer_digits: usize,
    /// Maximum number of digits after the decimal point of a [`Decimal`].
    pub max_decimal_scale: usize,
}

impl Limits {
    pub const DEFAULT: Self = Self {
        max_bigint_digits: 80,
        max_decimal_integer_digits: 40,
        max_decimal_scale: 80,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
