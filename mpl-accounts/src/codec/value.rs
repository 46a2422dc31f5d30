//! Dynamic values produced by the codec engine.

use crate::error::DataError;

/// A decoded field value.
///
/// [`Value::Absent`] marks a field with no value: an unset optional, or a
/// draft field a transform has not assigned yet. It is never a zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Absent,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Bool(bool),
    Bytes(Vec<u8>),
    /// A 32-byte key in its base58 text form.
    PublicKey(String),
    Record(Record),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

/// An ordered set of named values, laid out in schema field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Replace the value of `name`, appending the field if it is new.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Value of `name`, treating an undeclared field as absent.
    pub fn value(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&Value::Absent)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn u8(&self, name: &str) -> Result<u8, DataError> {
        match self.value(name) {
            Value::U8(v) => Ok(*v),
            other => Err(mismatch(name, other, "u8")),
        }
    }

    pub fn u64(&self, name: &str) -> Result<u64, DataError> {
        match self.value(name) {
            Value::U64(v) => Ok(*v),
            other => Err(mismatch(name, other, "u64")),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool, DataError> {
        match self.value(name) {
            Value::Bool(v) => Ok(*v),
            other => Err(mismatch(name, other, "bool")),
        }
    }

    pub fn optional_u64(&self, name: &str) -> Result<Option<u64>, DataError> {
        match self.value(name) {
            Value::Absent => Ok(None),
            Value::U64(v) => Ok(Some(*v)),
            other => Err(mismatch(name, other, "optional u64")),
        }
    }

    pub fn public_key(&self, name: &str) -> Result<&str, DataError> {
        match self.value(name) {
            Value::PublicKey(v) => Ok(v),
            other => Err(mismatch(name, other, "public key")),
        }
    }

    pub fn record(&self, name: &str) -> Result<&Record, DataError> {
        match self.value(name) {
            Value::Record(v) => Ok(v),
            other => Err(mismatch(name, other, "record")),
        }
    }
}

fn mismatch(name: &str, found: &Value, expected: &'static str) -> DataError {
    let cause = if found.is_absent() {
        DataError::MissingValue
    } else {
        DataError::TypeMismatch { expected }
    };
    cause.in_field(name)
}
