//! # mpl-accounts - Versioned Metaplex Account Decoding
//!
//! Decodes the fixed-layout account blobs of the Token Metadata and Metaplex
//! programs into typed, versioned records, and re-encodes them.
//!
//! ## Core Architecture
//!
//! ### Schema-driven codec
//!
//! Every record kind is described by a [`Schema`]: an ordered field list
//! whose declaration order is the byte order on the wire. Schemas compose
//! (a child extends a parent's byte prefix) and may reference nested record
//! types registered by their dependencies. The [`codec`] engine walks a
//! schema over a buffer, tolerating trailing bytes, and back.
//!
//! ### Versioned records
//!
//! A record kind may have several layouts, told apart by the leading
//! discriminant byte. [`Versions`] reads that byte and decodes with the one
//! matching layout, rejecting retired layouts with
//! [`Error::DeprecatedFormat`].
//!
//! ### Account wrapper
//!
//! [`Account<T>`] binds a decoded record to its address and owning program.
//! Construction validates in a fixed order:
//!
//! 1. **Ownership**: owner must equal `T::Program::ID` ([`Error::InvalidOwner`])
//! 2. **Format**: discriminant must select a supported layout
//!    ([`Error::DeprecatedFormat`] or [`Error::InvalidAccountData`])
//!
//! No partially-validated account is ever returned.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mpl_accounts::programs::metadata::MasterEdition;
//! use mpl_accounts::{Account, Curve25519};
//!
//! let (address, _bump) = MasterEdition::pda(&Curve25519, &mint);
//! let edition: Account<MasterEdition> = Account::fetch(&rpc, &address).await?;
//! println!("supply = {}", edition.data().supply());
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`]: Scalar registry, schemas, and the binary engine
//! - [`versioned`]: Discriminant dispatch over record versions
//! - [`wrappers`]: [`Account<T>`] and the [`AccountData`] trait
//! - [`rpc`], [`pda`]: Fetch and address-derivation collaborators
//! - [`programs`]: Token Metadata and Metaplex account kinds

// Lets `#[account_keys]` expansions name `::mpl_accounts` from inside this crate.
extern crate self as mpl_accounts;

pub mod codec;
mod error;
pub mod pda;
pub mod programs;
pub mod rpc;
pub mod versioned;
pub mod wrappers;

pub use codec::{Field, Record, Scalar, Schema, SchemaBuilder, Transform, TypeTag, Value};
pub use error::{DataError, Error};
pub use mpl_accounts_macros::account_keys;
pub use pda::{AddressDeriver, Curve25519};
pub use rpc::{AccountFetcher, KeyedAccount, Memcmp, QueryError, RawAccount};
pub use solana_address::{address_eq, Address};
pub use versioned::{check_discriminator, Format, Version, Versions};
pub use wrappers::{Account, AccountData};

/// Compile-time identity of an on-chain program.
///
/// Implemented by the zero-sized program types that
/// [`account_keys`](macro@account_keys) generates. Account kinds bind to their
/// owning program through [`AccountData::Program`], so ownership checks use
/// the program ID without passing it at runtime.
pub trait Program {
    /// The program ID that owns this program's accounts.
    const ID: Address;

    /// Leading textual seed of this program's derived addresses.
    const PREFIX: &'static str;

    /// Derive an address owned by this program.
    #[inline]
    fn find_program_address<D: AddressDeriver>(deriver: &D, seeds: &[&[u8]]) -> (Address, u8) {
        deriver.find_program_address(seeds, &Self::ID)
    }
}
