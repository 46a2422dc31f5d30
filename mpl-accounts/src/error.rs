//! Error types for account decoding and validation.
//!
//! [`Error`] has one variant per validation gate, so callers can tell which
//! check refused an account. [`DataError`] refines
//! [`Error::InvalidAccountData`] with the codec-level cause.

use pinocchio::error::ProgramError;
use solana_address::Address;
use thiserror::Error;

/// Error raised while building schemas or constructing accounts.
#[derive(Error, Debug)]
pub enum Error {
    /// The account is not owned by the program the wrapper expects.
    #[error("invalid owner: expected {expected:?}, found {found:?}")]
    InvalidOwner { expected: Address, found: Address },
    /// The bytes do not match any known layout, or are too short for it.
    #[error("invalid account data: {0}")]
    InvalidAccountData(#[from] DataError),
    /// The discriminant names a layout that is recognized but retired.
    #[error("deprecated {kind} format (discriminant {discriminant})")]
    DeprecatedFormat {
        kind: &'static str,
        discriminant: u8,
    },
    /// A schema declaration is inconsistent.
    #[error("schema construction failed: {0}")]
    SchemaConstruction(String),
}

/// Cause of an [`Error::InvalidAccountData`].
#[derive(Error, Debug)]
pub enum DataError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
    #[error("unknown {kind} discriminant {found}")]
    UnknownDiscriminant { kind: &'static str, found: u8 },
    #[error("expected {expected} value")]
    TypeMismatch { expected: &'static str },
    #[error("missing value")]
    MissingValue,
    #[error("public key text {0:?} is not 32 base58 bytes")]
    InvalidPublicKey(String),
    #[error("record type {0} is not registered")]
    UnresolvedType(String),
    #[error("field {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<DataError>,
    },
}

impl DataError {
    /// Attach the name of the field being read or written.
    pub fn in_field(self, field: &str) -> Self {
        DataError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

/// Returns an error if the buffer holds fewer than `needed` bytes.
#[inline]
pub(crate) fn at_least(buf: &[u8], needed: usize) -> Result<(), DataError> {
    if buf.len() < needed {
        return Err(DataError::EndOfBuffer {
            needed,
            remaining: buf.len(),
        });
    }
    Ok(())
}

impl From<Error> for ProgramError {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidOwner { .. } => ProgramError::IllegalOwner,
            Error::InvalidAccountData(_) | Error::DeprecatedFormat { .. } => {
                ProgramError::InvalidAccountData
            }
            Error::SchemaConstruction(_) => ProgramError::InvalidArgument,
        }
    }
}
