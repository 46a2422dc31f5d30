//! Auction manager accounts.
//!
//! V2 embeds its run state as a nested `AuctionManagerStateV2` record, so its
//! schema depends on the state schema. V1 managers are recognized but no
//! longer decoded.

use std::sync::LazyLock;

use bytes::BytesMut;
use solana_address::Address;

use super::{BidRedemptionTicket, MetaplexKey, MetaplexProgram, WINNER_INDEX_OFFSETS};
use crate::codec::{address_to_text, Record, Schema, TypeTag, Value};
use crate::programs::key_text;
use crate::rpc::{AccountFetcher, Memcmp, QueryError};
use crate::versioned::{Version, Versions};
use crate::{Account, AccountData, AddressDeriver, DataError, Error, Program};

static AUCTION_MANAGER_STATE_V2: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("AuctionManagerStateV2")
        .field("status", TypeTag::U8)
        .field("safety_config_items_validated", TypeTag::U64)
        .field("bids_pushed_to_accept_payment", TypeTag::U64)
        .field("has_participation", TypeTag::Bool)
        .build()
        .expect("auction manager state v2 schema")
});

static AUCTION_MANAGER_V2: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("AuctionManagerV2")
        .field("key", TypeTag::U8)
        .field("store", TypeTag::PublicKey)
        .field("authority", TypeTag::PublicKey)
        .field("auction", TypeTag::PublicKey)
        .field("vault", TypeTag::PublicKey)
        .field("accept_payment", TypeTag::PublicKey)
        .field("state", TypeTag::record("AuctionManagerStateV2"))
        .depends_on(&AUCTION_MANAGER_STATE_V2)
        .transform(|record| record.set("key", Value::U8(MetaplexKey::AuctionManagerV2.into())))
        .build()
        .expect("auction manager v2 schema")
});

fn auction_manager_v2() -> &'static Schema {
    &AUCTION_MANAGER_V2
}

static VERSIONS: Versions<MetaplexKey> = Versions::new(
    AuctionManager::KIND,
    &[
        Version::deprecated(MetaplexKey::AuctionManagerV1),
        Version::schema(MetaplexKey::AuctionManagerV2, auction_manager_v2),
    ],
);

/// Lifecycle of an auction manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AuctionManagerStatus {
    Initialized = 0,
    Validated = 1,
    Running = 2,
    Disbursing = 3,
    Finished = 4,
}

impl TryFrom<u8> for AuctionManagerStatus {
    type Error = DataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AuctionManagerStatus::Initialized),
            1 => Ok(AuctionManagerStatus::Validated),
            2 => Ok(AuctionManagerStatus::Running),
            3 => Ok(AuctionManagerStatus::Disbursing),
            4 => Ok(AuctionManagerStatus::Finished),
            found => Err(DataError::UnknownDiscriminant {
                kind: "AuctionManagerStatus",
                found,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionManagerStateV2 {
    pub status: AuctionManagerStatus,
    pub safety_config_items_validated: u64,
    pub bids_pushed_to_accept_payment: u64,
    pub has_participation: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionManagerV2 {
    pub store: String,
    pub authority: String,
    pub auction: String,
    pub vault: String,
    pub accept_payment: String,
    pub state: AuctionManagerStateV2,
}

/// An auction manager in any supported layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuctionManager {
    V2(AuctionManagerV2),
}

impl AuctionManagerStateV2 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            status: AuctionManagerStatus::try_from(record.u8("status")?)
                .map_err(|e| e.in_field("status"))?,
            safety_config_items_validated: record.u64("safety_config_items_validated")?,
            bids_pushed_to_accept_payment: record.u64("bids_pushed_to_accept_payment")?,
            has_participation: record.bool("has_participation")?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("status", Value::U8(self.status as u8))
            .with(
                "safety_config_items_validated",
                Value::U64(self.safety_config_items_validated),
            )
            .with(
                "bids_pushed_to_accept_payment",
                Value::U64(self.bids_pushed_to_accept_payment),
            )
            .with("has_participation", Value::Bool(self.has_participation))
    }
}

impl AuctionManagerV2 {
    pub fn from_record(record: &Record) -> Result<Self, DataError> {
        Ok(Self {
            store: key_text(record, "store")?,
            authority: key_text(record, "authority")?,
            auction: key_text(record, "auction")?,
            vault: key_text(record, "vault")?,
            accept_payment: key_text(record, "accept_payment")?,
            state: AuctionManagerStateV2::from_record(record.record("state")?)
                .map_err(|e| e.in_field("state"))?,
        })
    }

    pub fn to_record(&self) -> Record {
        Record::new()
            .with("key", Value::U8(MetaplexKey::AuctionManagerV2.into()))
            .with("store", Value::PublicKey(self.store.clone()))
            .with("authority", Value::PublicKey(self.authority.clone()))
            .with("auction", Value::PublicKey(self.auction.clone()))
            .with("vault", Value::PublicKey(self.vault.clone()))
            .with("accept_payment", Value::PublicKey(self.accept_payment.clone()))
            .with("state", Value::Record(self.state.to_record()))
    }
}

impl AuctionManager {
    pub fn store(&self) -> &str {
        match self {
            AuctionManager::V2(v2) => &v2.store,
        }
    }

    pub fn auction(&self) -> &str {
        match self {
            AuctionManager::V2(v2) => &v2.auction,
        }
    }

    pub fn status(&self) -> AuctionManagerStatus {
        match self {
            AuctionManager::V2(v2) => v2.state.status,
        }
    }

    pub fn encode(&self) -> Result<BytesMut, Error> {
        match self {
            AuctionManager::V2(v2) => auction_manager_v2().encode(&v2.to_record()),
        }
    }

    /// Manager address of `auction`: `["metaplex", auction]`.
    pub fn pda<D: AddressDeriver>(deriver: &D, auction: &Address) -> (Address, u8) {
        MetaplexProgram::find_program_address(
            deriver,
            &[MetaplexProgram::PREFIX.as_bytes(), auction.as_ref()],
        )
    }
}

impl AccountData for AuctionManager {
    type Program = MetaplexProgram;
    const KIND: &'static str = "AuctionManager";

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (_, record) = VERSIONS.decode(data)?;
        Ok(AuctionManager::V2(AuctionManagerV2::from_record(&record)?))
    }
}

impl Account<AuctionManager> {
    /// Bid redemption tickets issued by this manager.
    ///
    /// The manager key sits at one of [`WINNER_INDEX_OFFSETS`] depending on
    /// each ticket's content, so every offset is queried and the results are
    /// kept only where the decoded manager is this account.
    pub async fn bid_redemption_tickets<F: AccountFetcher>(
        &self,
        fetcher: &F,
    ) -> Result<Vec<Account<BidRedemptionTicket>>, QueryError<F::Error>> {
        let manager = address_to_text(self.address());
        let mut tickets: Vec<Account<BidRedemptionTicket>> = Vec::new();
        for offset in WINNER_INDEX_OFFSETS {
            let found = Account::<BidRedemptionTicket>::query(
                fetcher,
                &[
                    Memcmp::discriminant(MetaplexKey::BidRedemptionTicketV2),
                    Memcmp::address(offset, self.address()),
                ],
            )
            .await?;
            for ticket in found {
                if ticket.data().auction_manager() == manager
                    && !tickets.iter().any(|t| t.address() == ticket.address())
                {
                    tickets.push(ticket);
                }
            }
        }
        Ok(tickets)
    }
}
