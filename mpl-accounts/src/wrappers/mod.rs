//! Typed account wrappers over retrieved account bytes.
//!
//! # Wrapper Types
//!
//! | Type | Purpose | Validates |
//! |------|---------|-----------|
//! | [`Account<T>`] | Decoded record + address | Owner, discriminant, length |
//!
//! # The Program Pattern
//!
//! Every [`AccountData`] kind names its owning [`Program`](crate::Program).
//! Ownership validation reads the program ID from that type, so callers never
//! pass it at runtime:
//!
//! ```ignore
//! let store = Account::<Store>::load(address, &owner, &data)?;
//! //                    ^^^^^ owned by MetaplexProgram
//! ```
//!
//! # Batches
//!
//! [`Account::load_all`] and the query helpers built on it fail the whole
//! batch on the first account that does not construct, reporting that
//! account's address in [`QueryError::Account`](crate::QueryError::Account).

mod account;
mod traits;

pub use account::Account;
pub use traits::AccountData;
