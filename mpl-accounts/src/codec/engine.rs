//! Schema-driven binary codec.
//!
//! [`decode`] walks a schema's fields in declaration order and tolerates
//! trailing bytes: account buffers are routinely allocated larger than the
//! record they hold. [`encode`] writes the same fields in the same order.

use bytes::{Buf, BufMut, BytesMut};
use tracing::trace;

use super::schema::{Layout, Lookup, Schema, TypeTag};
use super::value::{Record, Value};
use crate::error::{at_least, DataError, Error};

/// Decode `data` according to `schema`, ignoring any bytes past the record.
///
/// # Errors
///
/// [`Error::InvalidAccountData`] if `data` is shorter than the record.
pub fn decode(schema: &Schema, data: &[u8]) -> Result<Record, Error> {
    let mut buf = data;
    let record = read_layout(schema.layout(), schema.lookup(), &mut buf)?;
    trace!(
        schema = schema.name(),
        consumed = data.len() - buf.len(),
        trailing = buf.len(),
        "decoded record"
    );
    Ok(record)
}

/// Encode `record` according to `schema`.
///
/// # Errors
///
/// [`Error::InvalidAccountData`] naming the field whose value does not fit
/// its declared type.
pub fn encode(schema: &Schema, record: &Record) -> Result<BytesMut, Error> {
    let mut buf = BytesMut::with_capacity(encoded_len(schema, record)?);
    write_layout(schema.layout(), schema.lookup(), record, &mut buf)?;
    Ok(buf)
}

/// Number of bytes [`encode`] produces for `record`.
pub fn encoded_len(schema: &Schema, record: &Record) -> Result<usize, Error> {
    Ok(layout_len(schema.layout(), schema.lookup(), record)?)
}

impl Schema {
    /// See [`decode`].
    pub fn decode(&self, data: &[u8]) -> Result<Record, Error> {
        decode(self, data)
    }

    /// See [`encode`].
    pub fn encode(&self, record: &Record) -> Result<BytesMut, Error> {
        encode(self, record)
    }
}

fn read_layout(layout: &Layout, lookup: &Lookup, buf: &mut &[u8]) -> Result<Record, DataError> {
    // Every declared field starts out absent.
    let mut draft = Record::new();
    for field in &layout.fields {
        draft.set(&field.name, Value::Absent);
    }
    for field in &layout.fields {
        let value = read_value(&field.ty, lookup, buf).map_err(|e| e.in_field(&field.name))?;
        draft.set(&field.name, value);
    }
    if let Some(transform) = layout.transform {
        transform(&mut draft);
    }
    Ok(draft)
}

fn read_value(ty: &TypeTag, lookup: &Lookup, buf: &mut &[u8]) -> Result<Value, DataError> {
    if let Some(scalar) = ty.scalar() {
        return scalar.codec().decode(buf);
    }
    match ty {
        TypeTag::FixedBytes(len) => {
            at_least(buf, *len)?;
            let bytes = buf[..*len].to_vec();
            buf.advance(*len);
            Ok(Value::Bytes(bytes))
        }
        TypeTag::Optional(inner) => {
            at_least(buf, 1)?;
            match buf.get_u8() {
                0 => Ok(Value::Absent),
                _ => read_value(inner, lookup, buf),
            }
        }
        TypeTag::Record(name) => {
            let layout = resolve(lookup, name)?;
            Ok(Value::Record(read_layout(layout, lookup, buf)?))
        }
        _ => unreachable!("scalar tags are handled by the registry"),
    }
}

fn write_layout(
    layout: &Layout,
    lookup: &Lookup,
    record: &Record,
    buf: &mut BytesMut,
) -> Result<(), DataError> {
    for field in &layout.fields {
        write_value(&field.ty, lookup, record.value(&field.name), buf)
            .map_err(|e| e.in_field(&field.name))?;
    }
    Ok(())
}

fn write_value(
    ty: &TypeTag,
    lookup: &Lookup,
    value: &Value,
    buf: &mut BytesMut,
) -> Result<(), DataError> {
    if let TypeTag::Optional(inner) = ty {
        if value.is_absent() {
            buf.put_u8(0);
            return Ok(());
        }
        buf.put_u8(1);
        return write_value(inner, lookup, value, buf);
    }
    if value.is_absent() {
        return Err(DataError::MissingValue);
    }
    if let Some(scalar) = ty.scalar() {
        return scalar.codec().encode(value, buf);
    }
    match (ty, value) {
        (TypeTag::FixedBytes(len), Value::Bytes(bytes)) if bytes.len() == *len => {
            buf.put_slice(bytes);
            Ok(())
        }
        (TypeTag::FixedBytes(_), _) => Err(DataError::TypeMismatch {
            expected: "fixed-size bytes",
        }),
        (TypeTag::Record(name), Value::Record(nested)) => {
            write_layout(resolve(lookup, name)?, lookup, nested, buf)
        }
        (TypeTag::Record(_), _) => Err(DataError::TypeMismatch { expected: "record" }),
        _ => unreachable!("scalar and optional tags are handled above"),
    }
}

fn layout_len(layout: &Layout, lookup: &Lookup, record: &Record) -> Result<usize, DataError> {
    layout.fields.iter().try_fold(0, |total, field| {
        let len = value_len(&field.ty, lookup, record.value(&field.name))
            .map_err(|e| e.in_field(&field.name))?;
        Ok(total + len)
    })
}

fn value_len(ty: &TypeTag, lookup: &Lookup, value: &Value) -> Result<usize, DataError> {
    if let Some(scalar) = ty.scalar() {
        return Ok(scalar.codec().width);
    }
    match (ty, value) {
        (TypeTag::FixedBytes(len), _) => Ok(*len),
        (TypeTag::Optional(_), Value::Absent) => Ok(1),
        (TypeTag::Optional(inner), _) => Ok(1 + value_len(inner, lookup, value)?),
        (TypeTag::Record(name), Value::Record(nested)) => {
            layout_len(resolve(lookup, name)?, lookup, nested)
        }
        (TypeTag::Record(_), Value::Absent) => Err(DataError::MissingValue),
        (TypeTag::Record(_), _) => Err(DataError::TypeMismatch { expected: "record" }),
        _ => unreachable!("scalar tags are handled by the registry"),
    }
}

fn resolve<'a>(lookup: &'a Lookup, name: &str) -> Result<&'a Layout, DataError> {
    lookup
        .get(name)
        .map(|layout| layout.as_ref())
        .ok_or_else(|| DataError::UnresolvedType(name.to_string()))
}
