use {
    crate::{Error, Limits},
    num::{BigUint, Zero},
    std::{fmt, str::FromStr},
};

/// A non-negative integer of arbitrary size.
///
/// Token amounts, reserves and clearing prices routinely exceed 64 bits (and
/// in principle 256 bits), so the value is backed by a [`BigUint`].
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BigInt(BigUint);

impl BigInt {
    /// Parses a string of decimal digits. Signs, whitespace, exponents and
    /// the empty string are rejected.
    pub fn parse(s: &str, limits: &Limits) -> Result<Self, Error> {
        if s.is_empty() || !crate::is_digits(s) {
            return Err(Error::Malformed);
        }
        if s.len() > limits.max_bigint_digits {
            return Err(Error::TooLarge);
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or(Error::Malformed)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for BigInt {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u128> for BigInt {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &Limits::DEFAULT)
    }
}

/// Canonical form: decimal digits without leading zeros (except `"0"`).
impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
