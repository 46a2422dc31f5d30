//! Master edition accounts.
//!
//! V2 is the current layout. V1 is V2 followed by two mints that were used
//! for printing and one-time printing authorization before V2 retired them.

use std::sync::LazyLock;

use bytes::BytesMut;
use solana_address::Address;

use super::{Edition, MetadataKey, MetadataProgram};
use crate::codec::{Record, Schema, TypeTag, Value};
use crate::programs::key_text;
use crate::rpc::{AccountFetcher, Memcmp, QueryError};
use crate::versioned::{Version, Versions};
use crate::{Account, AccountData, AddressDeriver, DataError, Error, Program};

/// Trailing seed of master edition and edition addresses.
pub const EDITION_SUFFIX: &str = "edition";

static MASTER_EDITION_V2: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("MasterEditionV2")
        .field("key", TypeTag::U8)
        .field("supply", TypeTag::U64)
        .field("max_supply", TypeTag::optional(TypeTag::U64))
        .transform(|record| record.set("key", Value::U8(MetadataKey::MasterEditionV2.into())))
        .build()
        .expect("master edition v2 schema")
});

static MASTER_EDITION_V1: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("MasterEditionV1")
        .extend(&MASTER_EDITION_V2)
        .field("printing_mint", TypeTag::PublicKey)
        .field("one_time_printing_authorization_mint", TypeTag::PublicKey)
        .transform(|record| record.set("key", Value::U8(MetadataKey::MasterEditionV1.into())))
        .build()
        .expect("master edition v1 schema")
});

fn master_edition_v1() -> &'static Schema {
    &MASTER_EDITION_V1
}

fn master_edition_v2() -> &'static Schema {
    &MASTER_EDITION_V2
}

static VERSIONS: Versions<MetadataKey> = Versions::new(
    MasterEdition::KIND,
    &[
        Version::schema(MetadataKey::MasterEditionV1, master_edition_v1),
        Version::schema(MetadataKey::MasterEditionV2, master_edition_v2),
    ],
);

/// Current master edition layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterEditionV2 {
    pub supply: u64,
    /// `None` means unlimited, not zero.
    pub max_supply: Option<u64>,
}

/// Retired master edition layout, still readable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterEditionV1 {
    pub supply: u64,
    pub max_supply: Option<u64>,
    pub printing_mint: String,
    pub one_time_printing_authorization_mint: String,
}

/// A master edition in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MasterEdition {
    V1(MasterEditionV1),
    V2(MasterEditionV2),
}

impl MasterEditionV2 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            supply: record.u64("supply")?,
            max_supply: record.optional_u64("max_supply")?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetadataKey::MasterEditionV2.into()))
            .with("supply", Value::U64(self.supply))
            .with("max_supply", self.max_supply.map_or(Value::Absent, Value::U64))
    }
}

impl MasterEditionV1 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            supply: record.u64("supply")?,
            max_supply: record.optional_u64("max_supply")?,
            printing_mint: key_text(record, "printing_mint")?,
            one_time_printing_authorization_mint: key_text(
                record,
                "one_time_printing_authorization_mint",
            )?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetadataKey::MasterEditionV1.into()))
            .with("supply", Value::U64(self.supply))
            .with("max_supply", self.max_supply.map_or(Value::Absent, Value::U64))
            .with("printing_mint", Value::PublicKey(self.printing_mint.clone()))
            .with(
                "one_time_printing_authorization_mint",
                Value::PublicKey(self.one_time_printing_authorization_mint.clone()),
            )
    }
}

impl MasterEdition {
    pub fn key(&self) -> MetadataKey {
        match self {
            MasterEdition::V1(_) => MetadataKey::MasterEditionV1,
            MasterEdition::V2(_) => MetadataKey::MasterEditionV2,
        }
    }

    pub fn supply(&self) -> u64 {
        match self {
            MasterEdition::V1(v1) => v1.supply,
            MasterEdition::V2(v2) => v2.supply,
        }
    }

    pub fn max_supply(&self) -> Option<u64> {
        match self {
            MasterEdition::V1(v1) => v1.max_supply,
            MasterEdition::V2(v2) => v2.max_supply,
        }
    }

    /// Whether `data` holds a master edition of any known layout.
    pub fn is_master_edition(data: &[u8]) -> bool {
        VERSIONS.matches(data)
    }

    /// Encode in the layout this value was decoded from.
    pub fn encode(&self) -> Result<BytesMut, Error> {
        match self {
            MasterEdition::V1(v1) => master_edition_v1().encode(&v1.to_record()),
            MasterEdition::V2(v2) => master_edition_v2().encode(&v2.to_record()),
        }
    }

    /// Master edition address of `mint`:
    /// `["metadata", program id, mint, "edition"]`.
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

impl AccountData for MasterEdition {
    type Program = MetadataProgram;
    const KIND: &'static str = "MasterEdition";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (key, record) = VERSIONS.decode(data)?;
        match key {
            MetadataKey::MasterEditionV1 => {
                Ok(MasterEdition::V1(MasterEditionV1::from_record(&record)?))
            }
            MetadataKey::MasterEditionV2 => {
                Ok(MasterEdition::V2(MasterEditionV2::from_record(&record)?))
            }
            other => Err(DataError::UnknownDiscriminant {
                kind: Self::KIND,
                found: other.into(),
            }
            .into()),
        }
    }
}

impl Account<MasterEdition> {
    /// Editions printed from this master edition.
    pub async fn editions<F: AccountFetcher>(
        &self,
        fetcher: &F,
    ) -> Result<Vec<Account<Edition>>, QueryError<F::Error>> {
        Account::query(
            fetcher,
            &[
                Memcmp::discriminant(MetadataKey::EditionV1),
                Memcmp::address(1, self.address()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve25519;

    fn v2_bytes(supply: u64, max_supply: Option<u64>) -> Vec<u8> {
        let mut data = vec![MetadataKey::MasterEditionV2.into()];
        data.extend_from_slice(&supply.to_le_bytes());
        match max_supply {
            Some(max) => {
                data.push(1);
                data.extend_from_slice(&max.to_le_bytes());
            }
            None => data.push(0),
        }
        data
    }

    #[test]
    fn test_schemas_build() {
        assert_eq!(master_edition_v2().fields().len(), 3);
        let names: Vec<_> = master_edition_v1()
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "key",
                "supply",
                "max_supply",
                "printing_mint",
                "one_time_printing_authorization_mint"
            ]
        );
    }

    #[test]
    fn test_decode_v2_without_max_supply() {
        let edition = MasterEdition::decode(&v2_bytes(1, None)).unwrap();
        assert_eq!(
            edition,
            MasterEdition::V2(MasterEditionV2 {
                supply: 1,
                max_supply: None
            })
        );
        assert_eq!(edition.key(), MetadataKey::MasterEditionV2);
    }

    #[test]
    fn test_decode_v1() {
        let printing = [8u8; 32];
        let one_time = [9u8; 32];
        let mut data = vec![MetadataKey::MasterEditionV1.into()];
        data.extend_from_slice(&5u64.to_le_bytes());
        data.push(1);
        data.extend_from_slice(&5u64.to_le_bytes());
        data.extend_from_slice(&printing);
        data.extend_from_slice(&one_time);

        let MasterEdition::V1(v1) = MasterEdition::decode(&data).unwrap() else {
            panic!("expected v1");
        };
        assert_eq!(v1.supply, 5);
        assert_eq!(v1.max_supply, Some(5));
        assert_eq!(v1.printing_mint, bs58::encode(printing).into_string());
        assert_eq!(
            v1.one_time_printing_authorization_mint,
            bs58::encode(one_time).into_string()
        );
    }

    #[test]
    fn test_zero_max_supply_is_not_absent() {
        let edition = MasterEdition::decode(&v2_bytes(3, Some(0))).unwrap();
        assert_eq!(edition.max_supply(), Some(0));
    }

    #[test]
    fn test_roundtrip() {
        for edition in [
            MasterEdition::V2(MasterEditionV2 {
                supply: 7,
                max_supply: None,
            }),
            MasterEdition::V2(MasterEditionV2 {
                supply: 7,
                max_supply: Some(10),
            }),
            MasterEdition::V1(MasterEditionV1 {
                supply: 2,
                max_supply: Some(4),
                printing_mint: bs58::encode([1u8; 32]).into_string(),
                one_time_printing_authorization_mint: bs58::encode([2u8; 32]).into_string(),
            }),
        ] {
            let encoded = edition.encode().unwrap();
            assert_eq!(MasterEdition::decode(&encoded).unwrap(), edition);
        }
        assert_eq!(
            MasterEdition::V2(MasterEditionV2 {
                supply: 1,
                max_supply: None
            })
            .encode()
            .unwrap()
            .as_ref(),
            v2_bytes(1, None).as_slice()
        );
    }

    #[test]
    fn test_other_metadata_keys_rejected() {
        let mut data = v2_bytes(1, None);
        data[0] = MetadataKey::EditionV1.into();
        assert!(matches!(
            MasterEdition::decode(&data),
            Err(Error::InvalidAccountData(DataError::UnknownDiscriminant { found: 1, .. }))
        ));
        assert!(MasterEdition::is_master_edition(&v2_bytes(1, None)));
        assert!(!MasterEdition::is_master_edition(&data));
    }

    #[test]
    fn test_pda() {
        let mint = Address::new_from_array([4; 32]);
        let (address, bump) = MasterEdition::pda(&Curve25519, &mint);
        let expected = Address::find_program_address(
            &[b"metadata", MetadataProgram::ID.as_ref(), mint.as_ref(), b"edition"],
            &MetadataProgram::ID,
        );
        assert_eq!((address, bump), expected);
    }
}
