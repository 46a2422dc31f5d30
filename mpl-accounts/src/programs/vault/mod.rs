//! Token Vault program accounts.
//!
//! Address: `vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn`
//!
//! Only the discriminants and program identity are defined here. Auction
//! managers and safety deposit boxes refer to vault accounts by address.

use crate::account_keys;

/// Discriminant of every Token Vault account.
#[account_keys(
    program = VaultProgram,
    id = "vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn",
    prefix = "vault"
)]
pub enum VaultKey {
    Uninitialized = 0,
    SafetyDepositBoxV1 = 1,
    ExternalPriceAccountV1 = 2,
    VaultV1 = 3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve25519, DataError, Error, Program};

    #[test]
    fn test_keys() {
        assert_eq!(VaultKey::try_from(3).unwrap(), VaultKey::VaultV1);
        assert_eq!(u8::from(VaultKey::ExternalPriceAccountV1), 2);
        assert!(matches!(
            VaultKey::try_from(4),
            Err(Error::InvalidAccountData(DataError::UnknownDiscriminant {
                kind: "VaultKey",
                found: 4
            }))
        ));
        assert!(VaultKey::check(&[1, 9, 9], VaultKey::SafetyDepositBoxV1));
        assert!(!VaultKey::check(&[3], VaultKey::Uninitialized));
    }

    #[test]
    fn test_program_id() {
        assert_eq!(
            crate::codec::address_to_text(&VaultProgram::ID),
            "vau1zxA2LbssAUEF7Gpw91zMM1LvXrvpzJtmZ58rPsn"
        );
        assert_eq!(id(), &ID);
        assert_eq!(VaultProgram::PREFIX, "vault");
    }

    #[test]
    fn test_derivation_is_program_scoped() {
        let seeds: &[&[u8]] = &[b"vault", &[1; 32]];
        let (vault, _) = VaultProgram::find_program_address(&Curve25519, seeds);
        let (metadata, _) =
            crate::programs::metadata::MetadataProgram::find_program_address(&Curve25519, seeds);
        assert_ne!(vault, metadata);
    }
}
