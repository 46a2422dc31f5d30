//! Validated account wrapper.

use solana_address::{address_eq, Address};
use tracing::{debug, warn};

use super::traits::AccountData;
use crate::rpc::{AccountFetcher, KeyedAccount, Memcmp, QueryError};
use crate::{Error, Program};

/// A decoded record together with the address it was read from.
///
/// `Account` is a value, not a live handle: it holds the record as it was
/// when fetched. Re-fetch to observe later changes.
///
/// # Validation on Load
///
/// When calling [`load`](Self::load), the following checks are performed in
/// order, failing fast:
///
/// 1. **Ownership**: owner must equal `T::Program::ID`. Bytes are not inspected
///    when this fails.
/// 2. **Format**: the discriminant must select a supported layout, and the
///    buffer must be long enough for it.
///
/// # Example
///
/// ```ignore
/// let edition: Account<MasterEdition> = Account::load(address, &owner, &data)?;
/// let supply = edition.data().supply();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account<T> {
    address: Address,
    data: T,
}

impl<T: AccountData> Account<T> {
    /// Validate and decode an account's bytes.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - Account not owned by `T::Program`
    /// * [`Error::DeprecatedFormat`] - Discriminant of a retired layout
    /// * [`Error::InvalidAccountData`] - Unknown discriminant or short buffer
    pub fn load(address: Address, owner: &Address, data: &[u8]) -> Result<Self, Error> {
        if !address_eq(owner, &T::Program::ID) {
            debug!(kind = T::KIND, ?address, ?owner, "rejected account owner");
            return Err(Error::InvalidOwner {
                expected: T::Program::ID,
                found: *owner,
            });
        }
        let data = T::decode(data).inspect_err(|err| {
            debug!(kind = T::KIND, ?address, %err, "rejected account data");
        })?;
        debug!(kind = T::KIND, ?address, "loaded account");
        Ok(Self { address, data })
    }

    /// [`load`](Self::load) a keyed account returned by a program query.
    pub fn from_keyed(keyed: KeyedAccount) -> Result<Self, Error> {
        Self::load(keyed.address, &keyed.account.owner, &keyed.account.data)
    }

    /// Fetch and load the account at `address`.
    pub async fn fetch<F: AccountFetcher>(
        fetcher: &F,
        address: &Address,
    ) -> Result<Self, QueryError<F::Error>> {
        let raw = fetcher
            .get_account(address)
            .await
            .map_err(QueryError::Fetch)?
            .ok_or(QueryError::NotFound(*address))?;
        Self::load(*address, &raw.owner, &raw.data).map_err(|source| QueryError::Account {
            address: *address,
            source,
        })
    }

    /// Load every account in `accounts`, failing on the first that does not
    /// construct.
    pub fn load_all<E>(accounts: Vec<KeyedAccount>) -> Result<Vec<Self>, QueryError<E>> {
        let total = accounts.len();
        accounts
            .into_iter()
            .map(|keyed| {
                let address = keyed.address;
                Self::from_keyed(keyed).map_err(|source| {
                    warn!(kind = T::KIND, ?address, total, %source, "aborting account batch");
                    QueryError::Account { address, source }
                })
            })
            .collect()
    }

    /// Fetch all accounts of `T::Program` passing `filters` and load them as `T`.
    pub async fn query<F: AccountFetcher>(
        fetcher: &F,
        filters: &[Memcmp],
    ) -> Result<Vec<Self>, QueryError<F::Error>> {
        let accounts = fetcher
            .get_program_accounts(&T::Program::ID, filters)
            .await
            .map_err(QueryError::Fetch)?;
        debug!(kind = T::KIND, matched = accounts.len(), "queried program accounts");
        Self::load_all(accounts)
    }

    /// The program that owns this account.
    #[inline]
    pub fn owner(&self) -> Address {
        T::Program::ID
    }
}

impl<T> Account<T> {
    /// Get the account's address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Get a reference to the decoded record.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> T {
        self.data
    }
}
