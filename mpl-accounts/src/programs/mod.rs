//! Account kinds of the programs this crate understands.
//!
//! | Module | Program | Kinds |
//! |--------|---------|-------|
//! | [`metadata`] | Token Metadata | [`MasterEdition`](metadata::MasterEdition), [`Edition`](metadata::Edition) |
//! | [`metaplex`] | Metaplex | [`Store`](metaplex::Store), [`WhitelistedCreator`](metaplex::WhitelistedCreator), [`AuctionManager`](metaplex::AuctionManager), [`BidRedemptionTicket`](metaplex::BidRedemptionTicket) |
//! | [`vault`] | Token Vault | discriminants only ([`VaultKey`](vault::VaultKey)) |
//!
//! Discriminants are scoped per program: `2` is `MasterEditionV1` to Token
//! Metadata and `BidRedemptionTicketV1` to Metaplex.

use crate::codec::Record;
use crate::DataError;

pub mod metadata;
pub mod metaplex;
pub mod vault;

/// Owned text of a public-key field.
pub(crate) fn key_text(record: &Record, name: &str) -> Result<String, DataError> {
    record.public_key(name).map(str::to_owned)
}
