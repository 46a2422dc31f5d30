//! Account retrieval boundary.
//!
//! Fetching raw account bytes is the one suspending operation in the crate.
//! It sits behind [`AccountFetcher`], which an RPC client (or a test double)
//! implements. Failures on this side of the boundary are [`QueryError`]s,
//! kept apart from the decode and validation [`Error`]s.

use std::future::Future;

use solana_address::Address;
use thiserror::Error as ThisError;

use crate::error::Error;

/// Owner and data of an account, as returned by the cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAccount {
    pub owner: Address,
    pub data: Vec<u8>,
}

/// A [`RawAccount`] together with its address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedAccount {
    pub address: Address,
    pub account: RawAccount,
}

/// Byte-range filter for program account queries: `data[offset..]` must
/// start with `bytes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memcmp {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Memcmp {
    pub fn new(offset: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            bytes: bytes.into(),
        }
    }

    /// Matches accounts whose first byte is `key`.
    pub fn discriminant(key: impl Into<u8>) -> Self {
        Self::new(0, vec![key.into()])
    }

    /// Matches accounts holding `address` at `offset`.
    pub fn address(offset: usize, address: &Address) -> Self {
        Self::new(offset, address.as_ref())
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        self.offset
            .checked_add(self.bytes.len())
            .and_then(|end| data.get(self.offset..end))
            .is_some_and(|window| window == self.bytes.as_slice())
    }
}

/// Source of raw account data.
pub trait AccountFetcher {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one account, or `None` if it does not exist.
    fn get_account(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<Option<RawAccount>, Self::Error>> + Send;

    /// Fetch every account owned by `program` that passes all `filters`.
    fn get_program_accounts(
        &self,
        program: &Address,
        filters: &[Memcmp],
    ) -> impl Future<Output = Result<Vec<KeyedAccount>, Self::Error>> + Send;
}

/// Failure of a fetch-and-construct operation.
#[derive(ThisError, Debug)]
pub enum QueryError<E> {
    #[error("fetch failed: {0}")]
    Fetch(#[source] E),
    #[error("account {0:?} not found")]
    NotFound(Address),
    #[error("account {address:?} rejected: {source}")]
    Account {
        address: Address,
        #[source]
        source: Error,
    },
}
