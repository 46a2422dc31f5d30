//! Scalar codec registry.
//!
//! Every fixed-width wire type has one [`ScalarCodec`] entry in a static
//! table, looked up by [`Scalar`]. Integers are little-endian. Public keys are
//! 32 raw bytes on the wire and base58 text in memory.

use bytes::{Buf, BufMut, BytesMut};
use solana_address::Address;

use super::value::Value;
use crate::error::{at_least, DataError};

/// Width of a public key on the wire.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Fixed-width scalar wire types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    U8,
    U16,
    U32,
    U64,
    U128,
    Bool,
    PublicKey,
}

/// Decode/encode functions for one [`Scalar`].
pub struct ScalarCodec {
    pub name: &'static str,
    pub width: usize,
    read: fn(&mut &[u8]) -> Value,
    write: fn(&Value, &mut BytesMut) -> Result<(), DataError>,
}

impl Scalar {
    /// The registry entry for this scalar.
    #[inline]
    pub fn codec(self) -> &'static ScalarCodec {
        &REGISTRY[self as usize]
    }
}

impl ScalarCodec {
    /// Read one value, advancing `buf` by [`width`](Self::width) bytes.
    pub fn decode(&self, buf: &mut &[u8]) -> Result<Value, DataError> {
        at_least(buf, self.width)?;
        Ok((self.read)(buf))
    }

    /// Read one value at `offset`, returning it with the bytes consumed.
    pub fn decode_at(&self, data: &[u8], offset: usize) -> Result<(Value, usize), DataError> {
        let mut buf = data.get(offset..).ok_or(DataError::EndOfBuffer {
            needed: offset + self.width,
            remaining: data.len(),
        })?;
        let value = self.decode(&mut buf)?;
        Ok((value, self.width))
    }

    pub fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), DataError> {
        (self.write)(value, buf)
    }
}

macro_rules! numeric {
    ($name:literal, $variant:ident, $width:expr, $get:ident, $put:ident) => {
        ScalarCodec {
            name: $name,
            width: $width,
            read: |buf| Value::$variant(buf.$get()),
            write: |value, buf| match value {
                Value::$variant(v) => {
                    buf.$put(*v);
                    Ok(())
                }
                _ => Err(DataError::TypeMismatch { expected: $name }),
            },
        }
    };
}

// Indexed by `Scalar as usize`.
static REGISTRY: [ScalarCodec; 7] = [
    numeric!("u8", U8, 1, get_u8, put_u8),
    numeric!("u16", U16, 2, get_u16_le, put_u16_le),
    numeric!("u32", U32, 4, get_u32_le, put_u32_le),
    numeric!("u64", U64, 8, get_u64_le, put_u64_le),
    numeric!("u128", U128, 16, get_u128_le, put_u128_le),
    ScalarCodec {
        name: "bool",
        width: 1,
        read: |buf| Value::Bool(buf.get_u8() != 0),
        write: |value, buf| match value {
            Value::Bool(v) => {
                buf.put_u8(u8::from(*v));
                Ok(())
            }
            _ => Err(DataError::TypeMismatch { expected: "bool" }),
        },
    },
    ScalarCodec {
        name: "public key",
        width: PUBLIC_KEY_LEN,
        read: |buf| {
            let mut raw = [0u8; PUBLIC_KEY_LEN];
            buf.copy_to_slice(&mut raw);
            Value::PublicKey(bs58::encode(raw).into_string())
        },
        write: |value, buf| match value {
            Value::PublicKey(text) => {
                buf.put_slice(&public_key_bytes(text)?);
                Ok(())
            }
            _ => Err(DataError::TypeMismatch {
                expected: "public key",
            }),
        },
    },
];

fn public_key_bytes(text: &str) -> Result<[u8; PUBLIC_KEY_LEN], DataError> {
    let raw = bs58::decode(text)
        .into_vec()
        .map_err(|_| DataError::InvalidPublicKey(text.to_string()))?;
    raw.try_into()
        .map_err(|_| DataError::InvalidPublicKey(text.to_string()))
}

/// Base58 text form of an address.
pub fn address_to_text(address: &Address) -> String {
    bs58::encode(address.as_ref()).into_string()
}

/// Parse the base58 text form of an address.
pub fn address_from_text(text: &str) -> Result<Address, DataError> {
    public_key_bytes(text).map(Address::new_from_array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        for (scalar, name) in [
            (Scalar::U8, "u8"),
            (Scalar::U16, "u16"),
            (Scalar::U32, "u32"),
            (Scalar::U64, "u64"),
            (Scalar::U128, "u128"),
            (Scalar::Bool, "bool"),
            (Scalar::PublicKey, "public key"),
        ] {
            assert_eq!(scalar.codec().name, name);
        }
    }

    #[test]
    fn test_little_endian() {
        let data = [0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];
        let mut buf = &data[..];
        assert_eq!(
            Scalar::U64.codec().decode(&mut buf).unwrap(),
            Value::U64(0x0201)
        );
        assert_eq!(buf, &[0xff]);

        let mut out = BytesMut::new();
        Scalar::U16.codec().encode(&Value::U16(0x0102), &mut out).unwrap();
        assert_eq!(&out[..], &[0x02, 0x01]);
    }

    #[test]
    fn test_bool() {
        let codec = Scalar::Bool.codec();
        assert_eq!(codec.decode(&mut &[0u8][..]).unwrap(), Value::Bool(false));
        assert_eq!(codec.decode(&mut &[1u8][..]).unwrap(), Value::Bool(true));
        assert_eq!(codec.decode(&mut &[7u8][..]).unwrap(), Value::Bool(true));

        let mut out = BytesMut::new();
        codec.encode(&Value::Bool(true), &mut out).unwrap();
        codec.encode(&Value::Bool(false), &mut out).unwrap();
        assert_eq!(&out[..], &[1, 0]);
    }

    #[test]
    fn test_public_key_text() {
        let raw = [9u8; PUBLIC_KEY_LEN];
        let text = bs58::encode(raw).into_string();
        let (value, consumed) = Scalar::PublicKey.codec().decode_at(&raw, 0).unwrap();
        assert_eq!(consumed, PUBLIC_KEY_LEN);
        assert_eq!(value, Value::PublicKey(text.clone()));

        let mut out = BytesMut::new();
        Scalar::PublicKey.codec().encode(&value, &mut out).unwrap();
        assert_eq!(&out[..], &raw[..]);

        let address = address_from_text(&text).unwrap();
        assert_eq!(address_to_text(&address), text);
    }

    #[test]
    fn test_public_key_wrong_length() {
        let short = bs58::encode([1u8; 31]).into_string();
        let mut out = BytesMut::new();
        assert!(matches!(
            Scalar::PublicKey
                .codec()
                .encode(&Value::PublicKey(short), &mut out),
            Err(DataError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            address_from_text("not-base58-0OIl"),
            Err(DataError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_decode_at_short_buffer() {
        assert!(matches!(
            Scalar::U64.codec().decode_at(&[0u8; 9], 2),
            Err(DataError::EndOfBuffer {
                needed: 8,
                remaining: 7
            })
        ));
        assert!(matches!(
            Scalar::U8.codec().decode_at(&[0u8; 2], 5),
            Err(DataError::EndOfBuffer { .. })
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let mut out = BytesMut::new();
        assert!(matches!(
            Scalar::U64.codec().encode(&Value::U8(1), &mut out),
            Err(DataError::TypeMismatch { expected: "u64" })
        ));
        assert!(out.is_empty());
    }
}
