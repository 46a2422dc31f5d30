//! Token Metadata program accounts.
//!
//! Address: `metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s`

use crate::account_keys;

mod edition;
mod master_edition;

pub use edition::{Edition, EditionV1};
pub use master_edition::{MasterEdition, MasterEditionV1, MasterEditionV2, EDITION_SUFFIX};

/// Discriminant of every Token Metadata account.
#[account_keys(
    program = MetadataProgram,
    id = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s",
    prefix = "metadata"
)]
pub enum MetadataKey {
    Uninitialized = 0,
    EditionV1 = 1,
    MasterEditionV1 = 2,
    ReservationListV1 = 3,
    MetadataV1 = 4,
    ReservationListV2 = 5,
    MasterEditionV2 = 6,
    EditionMarker = 7,
}
