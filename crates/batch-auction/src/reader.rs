//! Structural validation of a generic JSON tree.
//!
//! Entities read their fields through [`Object`], which tracks what was read
//! so that everything else can be kept as opaque side data. Every field goes
//! through [`Presence`] first; a present `null` only collapses to "absent"
//! when the caller picks a policy (required, optional or defaulted).

use {
    crate::{
        error::{Error, Path},
        report::Report,
    },
    indexmap::IndexMap,
    number::{BigInt, Decimal, Limits},
    serde_json::{Map, Value},
    std::hash::Hash,
};

/// Unknown fields of an object, kept verbatim and in document order.
pub type Extra = Map<String, Value>;

pub(crate) struct Reader<'c> {
    limits: &'c Limits,
    report: Report,
}

impl<'c> Reader<'c> {
    pub fn new(limits: &'c Limits) -> Self {
        Self {
            limits,
            report: Report::default(),
        }
    }

    pub fn report(&mut self) -> &mut Report {
        &mut self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }
}

/// Converts a JSON value at `path` into a typed value.
pub(crate) trait Decode: Sized {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error>;
}

/// Map keys that carry meaning, i.e. identifiers.
pub(crate) trait Key: Sized + Hash + Eq {
    fn from_key(key: &str, path: &Path) -> Result<Self, Error>;
}

pub(crate) struct Object<'a> {
    path: Path,
    fields: &'a Map<String, Value>,
    read: Vec<&'static str>,
}

impl<'a> Object<'a> {
    pub fn new(value: &'a Value, path: &Path) -> Result<Self, Error> {
        match value {
            Value::Object(fields) => Ok(Self {
                path: path.clone(),
                fields,
                read: Vec::new(),
            }),
            other => Err(mismatch(path, "object", other)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn field(&mut self, name: &'static str) -> Field<'a> {
        self.read.push(name);
        let presence = match self.fields.get(name) {
            None => Presence::Absent,
            Some(Value::Null) => Presence::Null,
            Some(value) => Presence::Present(value),
        };
        Field {
            path: self.path.join(name),
            presence,
        }
    }

    /// Returns the fields that weren't read and records their paths.
    pub fn finish(self, reader: &mut Reader<'_>) -> Extra {
        let mut extra = Extra::new();
        for (name, value) in self.fields {
            if !self.read.contains(&name.as_str()) {
                reader.report.ignore(self.path.join(name));
                extra.insert(name.clone(), value.clone());
            }
        }
        extra
    }
}

pub(crate) enum Presence<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

pub(crate) struct Field<'a> {
    path: Path,
    presence: Presence<'a>,
}

impl<'a> Field<'a> {
    pub fn required_value(self) -> Result<(Path, &'a Value), Error> {
        match self.presence {
            Presence::Present(value) => Ok((self.path, value)),
            Presence::Absent | Presence::Null => Err(Error::MissingRequiredField(self.path)),
        }
    }

    pub fn required<T: Decode>(self, reader: &mut Reader<'_>) -> Result<T, Error> {
        let (path, value) = self.required_value()?;
        T::decode(value, &path, reader)
    }

    pub fn required_with<T>(
        self,
        decode: impl FnOnce(&Value, &Path) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let (path, value) = self.required_value()?;
        decode(value, &path)
    }

    pub fn optional<T: Decode>(self, reader: &mut Reader<'_>) -> Result<Option<T>, Error> {
        match self.presence {
            Presence::Present(value) => T::decode(value, &self.path, reader).map(Some),
            Presence::Absent | Presence::Null => Ok(None),
        }
    }

    pub fn or_default<T: Decode + Default>(self, reader: &mut Reader<'_>) -> Result<T, Error> {
        Ok(self.optional(reader)?.unwrap_or_default())
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn mismatch(path: &Path, expected: &'static str, got: &Value) -> Error {
    Error::TypeMismatch {
        path: path.clone(),
        expected,
        got: type_name(got),
    }
}

impl Decode for bool {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        value.as_bool().ok_or_else(|| mismatch(path, "boolean", value))
    }
}

impl Decode for String {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(path, "string", other)),
        }
    }
}

impl Decode for u8 {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| mismatch(path, "integer between 0 and 255", value))
    }
}

impl Decode for u32 {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| mismatch(path, "integer between 0 and 4294967295", value))
    }
}

impl Decode for i64 {
    fn decode(value: &Value, path: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        value
            .as_i64()
            .ok_or_else(|| mismatch(path, "64-bit integer", value))
    }
}

/// Amounts must be strings: JSON numbers can't carry them without loss.
impl Decode for BigInt {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        match value {
            Value::String(s) => {
                BigInt::parse(s, reader.limits).map_err(|err| Error::number(err, path))
            }
            other => Err(mismatch(path, "decimal integer string", other)),
        }
    }
}

/// Decimals are accepted as strings or as JSON numbers. Numbers are taken by
/// their exact source text, so they go through the same grammar as strings.
impl Decode for Decimal {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => return Err(mismatch(path, "decimal string or number", other)),
        };
        Decimal::parse(&text, reader.limits).map_err(|err| Error::number(err, path))
    }
}

/// Opaque data kept verbatim.
impl Decode for Value {
    fn decode(value: &Value, _: &Path, _: &mut Reader<'_>) -> Result<Self, Error> {
        Ok(value.clone())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let Value::Array(items) = value else {
            return Err(mismatch(path, "array", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::decode(item, &path.join(i), reader))
            .collect()
    }
}

impl<K: Key, V: Decode> Decode for IndexMap<K, V> {
    fn decode(value: &Value, path: &Path, reader: &mut Reader<'_>) -> Result<Self, Error> {
        let Value::Object(entries) = value else {
            return Err(mismatch(path, "object", value));
        };
        entries
            .iter()
            .map(|(key, value)| {
                let path = path.join(key);
                Ok::<_, Error>((K::from_key(key, &path)?, V::decode(value, &path, reader)?))
            })
            .collect()
    }
}
