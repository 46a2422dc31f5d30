//! Store accounts: a storefront's program configuration.

use std::sync::LazyLock;

use bytes::BytesMut;
use solana_address::Address;

use super::{AuctionManager, MetaplexKey, MetaplexProgram, WhitelistedCreator};
use crate::codec::{Record, Schema, TypeTag, Value};
use crate::programs::key_text;
use crate::rpc::{AccountFetcher, Memcmp, QueryError};
use crate::versioned::{Version, Versions};
use crate::{Account, AccountData, AddressDeriver, DataError, Error, Program};

static STORE_V1: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("StoreV1")
        .field("key", TypeTag::U8)
        .field("public", TypeTag::Bool)
        .field("auction_program", TypeTag::PublicKey)
        .field("token_vault_program", TypeTag::PublicKey)
        .field("token_metadata_program", TypeTag::PublicKey)
        .field("token_program", TypeTag::PublicKey)
        .transform(|record| {
            if record.value("public").is_absent() {
                record.set("public", Value::Bool(true));
            }
            record.set("key", Value::U8(MetaplexKey::StoreV1.into()));
        })
        .build()
        .expect("store v1 schema")
});

fn store_v1() -> &'static Schema {
    &STORE_V1
}

static VERSIONS: Versions<MetaplexKey> = Versions::new(
    Store::KIND,
    &[Version::schema(MetaplexKey::StoreV1, store_v1)],
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreV1 {
    /// Whether any whitelisted creator may list, or only the store owner.
    pub public: bool,
    pub auction_program: String,
    pub token_vault_program: String,
    pub token_metadata_program: String,
    pub token_program: String,
}

/// A store in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Store {
    V1(StoreV1),
}

impl StoreV1 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            public: record.bool("public")?,
            auction_program: key_text(record, "auction_program")?,
            token_vault_program: key_text(record, "token_vault_program")?,
            token_metadata_program: key_text(record, "token_metadata_program")?,
            token_program: key_text(record, "token_program")?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetaplexKey::StoreV1.into()))
            .with("public", Value::Bool(self.public))
            .with("auction_program", Value::PublicKey(self.auction_program.clone()))
            .with(
                "token_vault_program",
                Value::PublicKey(self.token_vault_program.clone()),
            )
            .with(
                "token_metadata_program",
                Value::PublicKey(self.token_metadata_program.clone()),
            )
            .with("token_program", Value::PublicKey(self.token_program.clone()))
    }
}

impl Store {
    pub fn is_public(&self) -> bool {
        match self {
            Store::V1(v1) => v1.public,
        }
    }

    pub fn encode(&self) -> Result<BytesMut, Error> {
        match self {
            Store::V1(v1) => store_v1().encode(&v1.to_record()),
        }
    }

    /// Store address of `owner`: `["metaplex", program id, owner]`.
    pub fn pda<D: AddressDeriver>(deriver: &D, owner: &Address) -> (Address, u8) {
        MetaplexProgram::find_program_address(
            deriver,
            &[
                MetaplexProgram::PREFIX.as_bytes(),
                MetaplexProgram::ID.as_ref(),
                owner.as_ref(),
            ],
        )
    }
}

impl AccountData for Store {
    type Program = MetaplexProgram;
    const KIND: &'static str = "Store";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (_, record) = VERSIONS.decode(data)?;
        Ok(Store::V1(StoreV1::from_record(&record)?))
    }
}

impl Account<Store> {
    /// Every whitelisted creator account of the program.
    ///
    /// Creator accounts carry no store field, so this is not narrowed to
    /// this store.
    pub async fn whitelisted_creators<F: AccountFetcher>(
        &self,
        fetcher: &F,
    ) -> Result<Vec<Account<WhitelistedCreator>>, QueryError<F::Error>> {
        Account::query(
            fetcher,
            &[Memcmp::discriminant(MetaplexKey::WhitelistedCreatorV1)],
        )
        .await
    }

    /// Auction managers assigned to this store.
    pub async fn auction_managers<F: AccountFetcher>(
        &self,
        fetcher: &F,
    ) -> Result<Vec<Account<AuctionManager>>, QueryError<F::Error>> {
        Account::query(
            fetcher,
            &[
                Memcmp::discriminant(MetaplexKey::AuctionManagerV2),
                Memcmp::address(1, self.address()),
            ],
        )
        .await
    }
}
