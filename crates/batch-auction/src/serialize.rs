//! Serialization adapters for fields whose wire form differs from the
//! default.

use {
    number::Decimal,
    serde::{Serialize, Serializer, ser},
    serde_with::SerializeAs,
};

/// Serialize binary data as a `0x`-prefixed hexadecimal string.
#[derive(Debug)]
pub struct Hex;

impl SerializeAs<Vec<u8>> for Hex {
    fn serialize_as<S: Serializer>(source: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&const_hex::encode_prefixed(source))
    }
}

/// Serialize a [`Decimal`] as a JSON number carrying its exact text.
#[derive(Debug)]
pub struct JsonNumber;

impl SerializeAs<Decimal> for JsonNumber {
    fn serialize_as<S: Serializer>(source: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let text = source.to_string();
        let number = serde_json::from_str::<serde_json::Number>(&text).map_err(|err| {
            <S::Error as ser::Error>::custom(format!(
                "failed to encode {text:?} as JSON number: {err}"
            ))
        })?;
        number.serialize(serializer)
    }
}
