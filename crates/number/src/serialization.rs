//! Serde support for [`BigInt`] and [`Decimal`].
//!
//! Both serialize as their canonical string and deserialize from a string
//! using the default [`Limits`].

use {
    crate::{BigInt, Decimal, Limits},
    serde::{
        Deserialize,
        Deserializer,
        Serialize,
        Serializer,
        de::{self, Visitor},
    },
    std::fmt,
};

impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BigIntVisitor;

        impl Visitor<'_> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a non-negative integer encoded as a decimal string"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                BigInt::parse(s, &Limits::DEFAULT).map_err(|err| {
                    E::custom(format!("failed to decode {s:?} as big integer: {err}"))
                })
            }
        }

        deserializer.deserialize_str(BigIntVisitor)
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a non-negative decimal encoded as a string")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::parse(s, &Limits::DEFAULT).map_err(|err| {
                    E::custom(format!("failed to decode {s:?} as decimal: {err}"))
                })
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}
