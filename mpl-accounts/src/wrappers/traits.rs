//! Traits for account wrappers.
//!
//! This module defines [`AccountData`], the contract between a record kind
//! and the [`Account`](super::Account) wrapper that validates and holds it.

use crate::{Error, Program};

/// A record kind stored in accounts of one program.
///
/// # Example
///
/// ```ignore
/// impl AccountData for Store {
///     type Program = MetaplexProgram;
///     const KIND: &'static str = "Store";
///
///     fn decode(data: &[u8]) -> Result<Self, Error> {
///         let (_, record) = VERSIONS.decode(data)?;
///         Ok(Store::from_record(&record)?)
///     }
/// }
/// ```
pub trait AccountData: Sized {
    /// The program that must own accounts of this kind.
    type Program: Program;

    /// Human-readable kind name, used in errors and logs.
    const KIND: &'static str;

    /// Decode account bytes, probing the discriminant to pick a layout.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidAccountData`] - Unknown discriminant or short buffer
    /// * [`Error::DeprecatedFormat`] - Discriminant of a retired layout
    fn decode(data: &[u8]) -> Result<Self, Error>;
}
