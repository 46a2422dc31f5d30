//! Metaplex auction program accounts.
//!
//! Address: `p1exdMJcjVao65QdewkaZRUnU6VPSXhus9n2GzWfh98`

use crate::account_keys;

mod auction_manager;
mod bid_redemption_ticket;
mod store;
mod whitelisted_creator;

pub use auction_manager::{AuctionManager, AuctionManagerStateV2, AuctionManagerStatus, AuctionManagerV2};
pub use bid_redemption_ticket::{BidRedemptionTicket, BidRedemptionTicketV2, WINNER_INDEX_OFFSETS};
pub use store::{Store, StoreV1};
pub use whitelisted_creator::{WhitelistedCreator, WhitelistedCreatorV1};

/// Discriminant of every Metaplex account.
#[account_keys(
    program = MetaplexProgram,
    id = "p1exdMJcjVao65QdewkaZRUnU6VPSXhus9n2GzWfh98",
    prefix = "metaplex"
)]
pub enum MetaplexKey {
    Uninitialized = 0,
    OriginalAuthorityLookupV1 = 1,
    BidRedemptionTicketV1 = 2,
    StoreV1 = 3,
    WhitelistedCreatorV1 = 4,
    PayoutTicketV1 = 5,
    SafetyDepositValidationTicketV1 = 6,
    AuctionManagerV1 = 7,
    PrizeTrackingTicketV1 = 8,
    SafetyDepositConfigV1 = 9,
    AuctionManagerV2 = 10,
    BidRedemptionTicketV2 = 11,
    AuctionWinnerTokenTypeTrackerV1 = 12,
}
