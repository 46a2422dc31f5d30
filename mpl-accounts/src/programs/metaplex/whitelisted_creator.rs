//! Whitelisted creator accounts.

use std::sync::LazyLock;

use bytes::BytesMut;
use solana_address::Address;

use super::{MetaplexKey, MetaplexProgram};
use crate::codec::{Record, Schema, TypeTag, Value};
use crate::programs::key_text;
use crate::versioned::{Version, Versions};
use crate::{AccountData, AddressDeriver, DataError, Error, Program};

static WHITELISTED_CREATOR_V1: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("WhitelistedCreatorV1")
        .field("key", TypeTag::U8)
        .field("address", TypeTag::PublicKey)
        .field("activated", TypeTag::Bool)
        .transform(|record| {
            if record.value("activated").is_absent() {
                record.set("activated", Value::Bool(true));
            }
            record.set("key", Value::U8(MetaplexKey::WhitelistedCreatorV1.into()));
        })
        .build()
        .expect("whitelisted creator v1 schema")
});

fn whitelisted_creator_v1() -> &'static Schema {
    &WHITELISTED_CREATOR_V1
}

static VERSIONS: Versions<MetaplexKey> = Versions::new(
    WhitelistedCreator::KIND,
    &[Version::schema(
        MetaplexKey::WhitelistedCreatorV1,
        whitelisted_creator_v1,
    )],
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhitelistedCreatorV1 {
    /// The creator's wallet.
    pub address: String,
    pub activated: bool,
}

/// A whitelisted creator in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WhitelistedCreator {
    V1(WhitelistedCreatorV1),
}

impl WhitelistedCreatorV1 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            address: key_text(record, "address")?,
            activated: record.bool("activated")?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetaplexKey::WhitelistedCreatorV1.into()))
            .with("address", Value::PublicKey(self.address.clone()))
            .with("activated", Value::Bool(self.activated))
    }
}

impl WhitelistedCreator {
    pub fn address(&self) -> &str {
        match self {
            WhitelistedCreator::V1(v1) => &v1.address,
        }
    }

    pub fn is_activated(&self) -> bool {
        match self {
            WhitelistedCreator::V1(v1) => v1.activated,
        }
    }

    pub fn encode(&self) -> Result<BytesMut, Error> {
        match self {
            WhitelistedCreator::V1(v1) => whitelisted_creator_v1().encode(&v1.to_record()),
        }
    }

    /// Whitelist entry of `creator` in `store`:
    /// `["metaplex", program id, store, creator]`.
    pub fn pda<D: AddressDeriver>(deriver: &D, store: &Address, creator: &Address) -> (Address, u8) {
        MetaplexProgram::find_program_address(
            deriver,
            &[
                MetaplexProgram::PREFIX.as_bytes(),
                MetaplexProgram::ID.as_ref(),
                store.as_ref(),
                creator.as_ref(),
            ],
        )
    }
}

impl AccountData for WhitelistedCreator {
    type Program = MetaplexProgram;
    const KIND: &'static str = "WhitelistedCreator";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (_, record) = VERSIONS.decode(data)?;
        Ok(WhitelistedCreator::V1(WhitelistedCreatorV1::from_record(&record)?))
    }
}
