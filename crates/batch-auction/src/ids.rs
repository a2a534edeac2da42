//! Opaque identifiers.
//!
//! Identifiers are non-empty strings. Token identifiers are usually addresses
//! but their format is deliberately not interpreted so that the same schema
//! works across chains.

use {
    crate::{
        error::{Error, Path},
        reader::{Decode, Key, Reader, mismatch},
    },
    serde::Serialize,
    serde_json::Value,
    std::{borrow::Borrow, fmt, str::FromStr},
};

macro_rules! identifier {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fails with [`Error::EmptyIdentifier`] for the empty string.
            pub fn parse(s: &str, path: &Path) -> Result<Self, Error> {
                if s.is_empty() {
                    return Err(Error::EmptyIdentifier(path.clone()));
                }
                Ok(Self(s.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s, &Path::root())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Decode for $name {
            fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
                match value {
                    Value::String(s) => Self::parse(s, path),
                    other => Err(mismatch(path, "string", other)),
                }
            }
        }

        impl Key for $name {
            fn from_key(key: &str, path: &Path) -> Result<Self, Error> {
                Self::parse(key, path)
            }
        }
    };
}

identifier!(
    /// Token unique identifier.
    TokenId
);
identifier!(
    /// Order unique identifier.
    OrderId
);
identifier!(
    /// AMM unique identifier.
    AmmId
);
identifier!(
    /// Target contract of an interaction.
    Address
);
