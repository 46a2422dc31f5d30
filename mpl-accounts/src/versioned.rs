//! Versioned record layouts and discriminant dispatch.
//!
//! A record kind may have several binary layouts over its lifetime. Each
//! [`Version`] pairs the discriminant byte that leads the buffer with the way
//! to decode what follows. [`Versions::decode`] reads the first byte, picks
//! the matching version, and decodes with it and nothing else.
//!
//! # Example
//!
//! ```ignore
//! static VERSIONS: Versions<MetadataKey> = Versions::new(
//!     "MasterEdition",
//!     &[
//!         Version::schema(MetadataKey::MasterEditionV1, master_edition_v1),
//!         Version::schema(MetadataKey::MasterEditionV2, master_edition_v2),
//!     ],
//! );
//!
//! let (key, record) = VERSIONS.decode(data)?;
//! ```

use crate::codec::{Record, Schema};
use crate::error::{DataError, Error};

/// How the bytes of one version are decoded.
#[derive(Clone, Copy)]
pub enum Format {
    /// Decoded by a process-wide schema.
    Schema(fn() -> &'static Schema),
    /// Decoded by hand, for layouts whose offsets depend on content.
    Custom(fn(&[u8]) -> Result<Record, Error>),
    /// Recognized but no longer accepted.
    Deprecated,
}

/// One binary layout of a record kind.
#[derive(Clone, Copy)]
pub struct Version<K> {
    pub key: K,
    pub format: Format,
}

impl<K> Version<K> {
    pub const fn schema(key: K, schema: fn() -> &'static Schema) -> Self {
        Self {
            key,
            format: Format::Schema(schema),
        }
    }

    pub const fn custom(key: K, decode: fn(&[u8]) -> Result<Record, Error>) -> Self {
        Self {
            key,
            format: Format::Custom(decode),
        }
    }

    pub const fn deprecated(key: K) -> Self {
        Self {
            key,
            format: Format::Deprecated,
        }
    }
}

/// The known versions of one record kind.
pub struct Versions<K: 'static> {
    kind: &'static str,
    versions: &'static [Version<K>],
}

impl<K: Copy + Into<u8> + 'static> Versions<K> {
    pub const fn new(kind: &'static str, versions: &'static [Version<K>]) -> Self {
        Self { kind, versions }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The version whose discriminant leads `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAccountData`] if `data` is empty or no version matches.
    /// - [`Error::DeprecatedFormat`] if the matching version is retired.
    pub fn select(&self, data: &[u8]) -> Result<&'static Version<K>, Error> {
        let found = *data.first().ok_or(DataError::EndOfBuffer {
            needed: 1,
            remaining: 0,
        })?;
        let version = self
            .versions
            .iter()
            .find(|v| Into::<u8>::into(v.key) == found)
            .ok_or(DataError::UnknownDiscriminant {
                kind: self.kind,
                found,
            })?;
        if let Format::Deprecated = version.format {
            return Err(Error::DeprecatedFormat {
                kind: self.kind,
                discriminant: found,
            });
        }
        Ok(version)
    }

    /// Decode `data` with the version its discriminant selects.
    pub fn decode(&self, data: &[u8]) -> Result<(K, Record), Error> {
        let version = self.select(data)?;
        let record = match version.format {
            Format::Schema(schema) => schema().decode(data)?,
            Format::Custom(decode) => decode(data)?,
            Format::Deprecated => unreachable!("rejected by select"),
        };
        Ok((version.key, record))
    }

    /// Whether `data` leads with any known discriminant, retired ones included.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.versions
            .iter()
            .any(|v| check_discriminator(data, v.key.into()))
    }

    /// Whether `data` leads with the discriminant of `key`.
    pub fn is(&self, data: &[u8], key: K) -> bool {
        check_discriminator(data, key.into())
    }
}

/// Check if account data has the expected discriminator.
///
/// Returns `true` if the data is non-empty and the first byte matches.
#[inline]
pub fn check_discriminator(data: &[u8], expected: u8) -> bool {
    !data.is_empty() && data[0] == expected
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::codec::{TypeTag, Value};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Key {
        Old = 1,
        Small = 2,
        Large = 3,
    }

    impl From<Key> for u8 {
        fn from(key: Key) -> u8 {
            key as u8
        }
    }

    static SMALL: LazyLock<Schema> = LazyLock::new(|| {
        Schema::builder("Small")
            .field("key", TypeTag::U8)
            .field("value", TypeTag::U8)
            .build()
            .unwrap()
    });

    static LARGE: LazyLock<Schema> = LazyLock::new(|| {
        Schema::builder("Large")
            .field("key", TypeTag::U8)
            .field("value", TypeTag::U64)
            .build()
            .unwrap()
    });

    static VERSIONS: Versions<Key> = Versions::new(
        "Test",
        &[
            Version::deprecated(Key::Old),
            Version::schema(Key::Small, || &*SMALL),
            Version::schema(Key::Large, || &*LARGE),
        ],
    );

    #[test]
    fn test_dispatch_by_discriminant() {
        let data = [2, 7, 0, 0, 0, 0, 0, 0, 0];
        let (key, record) = VERSIONS.decode(&data).unwrap();
        assert_eq!(key, Key::Small);
        assert_eq!(record.value("value"), &Value::U8(7));

        let data = [3, 7, 0, 0, 0, 0, 0, 0, 0];
        let (key, record) = VERSIONS.decode(&data).unwrap();
        assert_eq!(key, Key::Large);
        assert_eq!(record.value("value"), &Value::U64(7));
    }

    #[test]
    fn test_deprecated_and_unknown() {
        assert!(matches!(
            VERSIONS.decode(&[1, 0, 0]),
            Err(Error::DeprecatedFormat {
                kind: "Test",
                discriminant: 1
            })
        ));
        assert!(matches!(
            VERSIONS.decode(&[9, 0, 0]),
            Err(Error::InvalidAccountData(DataError::UnknownDiscriminant {
                found: 9,
                ..
            }))
        ));
        assert!(matches!(
            VERSIONS.decode(&[]),
            Err(Error::InvalidAccountData(DataError::EndOfBuffer { .. }))
        ));
    }

    #[test]
    fn test_matches() {
        assert!(VERSIONS.matches(&[1]));
        assert!(VERSIONS.matches(&[3, 0]));
        assert!(!VERSIONS.matches(&[4]));
        assert!(!VERSIONS.matches(&[]));
        assert!(VERSIONS.is(&[2], Key::Small));
        assert!(!VERSIONS.is(&[2], Key::Large));
    }
}
