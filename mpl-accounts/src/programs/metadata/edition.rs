//! Printed edition accounts.

use std::sync::LazyLock;

use bytes::BytesMut;
use solana_address::Address;

use super::master_edition::EDITION_SUFFIX;
use super::{MetadataKey, MetadataProgram};
use crate::codec::{Record, Schema, TypeTag, Value};
use crate::programs::key_text;
use crate::versioned::{Version, Versions};
use crate::{AccountData, AddressDeriver, DataError, Error, Program};

static EDITION_V1: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("EditionV1")
        .field("key", TypeTag::U8)
        .field("parent", TypeTag::PublicKey)
        .field("edition", TypeTag::U64)
        .transform(|record| record.set("key", Value::U8(MetadataKey::EditionV1.into())))
        .build()
        .expect("edition v1 schema")
});

fn edition_v1() -> &'static Schema {
    &EDITION_V1
}

static VERSIONS: Versions<MetadataKey> = Versions::new(
    Edition::KIND,
    &[Version::schema(MetadataKey::EditionV1, edition_v1)],
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditionV1 {
    /// Address of the master edition this was printed from.
    pub parent: String,
    /// Edition number, starting at 1.
    pub edition: u64,
}

/// An edition in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edition {
    V1(EditionV1),
}

impl EditionV1 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            parent: key_text(record, "parent")?,
            edition: record.u64("edition")?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetadataKey::EditionV1.into()))
            .with("parent", Value::PublicKey(self.parent.clone()))
            .with("edition", Value::U64(self.edition))
    }
}

impl Edition {
    pub fn parent(&self) -> &str {
        match self {
            Edition::V1(v1) => &v1.parent,
        }
    }

    pub fn edition(&self) -> u64 {
        match self {
            Edition::V1(v1) => v1.edition,
        }
    }

    pub fn encode(&self) -> Result<BytesMut, Error> {
        match self {
            Edition::V1(v1) => edition_v1().encode(&v1.to_record()),
        }
    }

    /// Edition address of a printed `mint`. Shares its seeds with
    /// [`MasterEdition::pda`](super::MasterEdition::pda).
    pub fn pda<D: AddressDeriver>(deriver: &D, mint: &Address) -> (Address, u8) {
        MetadataProgram::find_program_address(
            deriver,
            &[
                MetadataProgram::PREFIX.as_bytes(),
                MetadataProgram::ID.as_ref(),
                mint.as_ref(),
                EDITION_SUFFIX.as_bytes(),
            ],
        )
    }
}

impl AccountData for Edition {
    type Program = MetadataProgram;
    const KIND: &'static str = "Edition";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (_, record) = VERSIONS.decode(data)?;
        Ok(Edition::V1(EditionV1::from_record(&record)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::metadata::MasterEdition;
    use crate::Curve25519;

    #[test]
    fn test_decode() {
        let parent = [6u8; 32];
        let mut data = vec![1u8];
        data.extend_from_slice(&parent);
        data.extend_from_slice(&42u64.to_le_bytes());
        data.extend_from_slice(&[0; 16]);

        let edition = Edition::decode(&data).unwrap();
        assert_eq!(edition.parent(), bs58::encode(parent).into_string());
        assert_eq!(edition.edition(), 42);
        assert_eq!(&edition.encode().unwrap()[..], &data[..41]);
    }

    #[test]
    fn test_short_buffer() {
        let mut data = vec![1u8];
        data.extend_from_slice(&[6u8; 32]);
        data.extend_from_slice(&[0; 7]);
        assert!(matches!(
            Edition::decode(&data),
            Err(Error::InvalidAccountData(DataError::Field { ref field, .. })) if field == "edition"
        ));
    }

    #[test]
    fn test_pda_matches_master_edition() {
        let mint = Address::new_from_array([2; 32]);
        assert_eq!(
            Edition::pda(&Curve25519, &mint),
            MasterEdition::pda(&Curve25519, &mint)
        );
    }
}
