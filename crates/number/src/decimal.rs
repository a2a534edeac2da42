use {
    crate::{Error, Limits},
    bigdecimal::BigDecimal,
    num::{BigUint, Zero},
    std::{fmt, str::FromStr},
};

/// A non-negative decimal number of arbitrary precision.
///
/// The value is stored as `mantissa * 10^-scale` where the scale is the
/// number of fractional digits that were written. Equality is structural, so
/// `0.30` and `0.3` are different values that compare equal only through
/// [`Decimal::to_big_decimal`].
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Decimal {
    mantissa: BigUint,
    scale: u32,
}

impl Decimal {
    pub fn new(mantissa: BigUint, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Parses `d+` or `d+.d+`. Exponents, signs and a bare decimal point are
    /// rejected.
    pub fn parse(s: &str, limits: &Limits) -> Result<Self, Error> {
        let (integer, fraction) = match s.split_once('.') {
            Some((_, "")) => return Err(Error::Malformed),
            Some((integer, fraction)) => (integer, fraction),
            None => (s, ""),
        };
        if integer.is_empty() || !crate::is_digits(integer) || !crate::is_digits(fraction) {
            return Err(Error::Malformed);
        }
        if integer.len() > limits.max_decimal_integer_digits
            || fraction.len() > limits.max_decimal_scale
        {
            return Err(Error::TooLarge);
        }

        let scale = u32::try_from(fraction.len()).map_err(|_| Error::TooLarge)?;
        let digits = [integer, fraction].concat();
        let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(Error::Malformed)?;
        Ok(Self { mantissa, scale })
    }

    pub fn mantissa(&self) -> &BigUint {
        &self.mantissa
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Converts into a [`BigDecimal`] for arithmetic.
    pub fn to_big_decimal(&self) -> BigDecimal {
        BigDecimal::new(self.mantissa.clone().into(), i64::from(self.scale))
    }

    /// Converts a [`BigDecimal`] keeping its scale. Returns `None` for negative
    /// values. Values with a negative exponent are expanded to scale 0.
    pub fn from_big_decimal(value: &BigDecimal) -> Option<Self> {
        let (int, exponent) = value.as_bigint_and_exponent();
        let mantissa = int.to_biguint()?;
        if exponent >= 0 {
            Some(Self {
                mantissa,
                scale: u32::try_from(exponent).ok()?,
            })
        } else {
            let factor = BigUint::from(10_u8).pow(u32::try_from(exponent.unsigned_abs()).ok()?);
            Some(Self {
                mantissa: mantissa * factor,
                scale: 0,
            })
        }
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(value.into(), 0)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &Limits::DEFAULT)
    }
}

/// Writes exactly `scale` fractional digits, so formatting and parsing again
/// preserves both value and scale.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            f.write_str(&digits)
        } else if digits.len() <= scale {
            write!(f, "0.{digits:0>scale$}")
        } else {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{integer}.{fraction}")
        }
    }
}
