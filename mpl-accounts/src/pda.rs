//! Program-derived address computation.
//!
//! Derivation is delegated to an [`AddressDeriver`]; [`Curve25519`] is the
//! native implementation, hashing seeds and searching bumps off-curve the
//! same way the runtime does.

use solana_address::Address;

/// Deterministic derivation of a program address from seeds.
pub trait AddressDeriver {
    /// Returns the canonical derived address and its bump seed.
    ///
    /// The result depends only on `seeds` and `program_id`.
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Address) -> (Address, u8);
}

/// Native derivation via [`Address::find_program_address`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Curve25519;

impl AddressDeriver for Curve25519 {
    #[inline]
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Address) -> (Address, u8) {
        Address::find_program_address(seeds, program_id)
    }
}

impl<D: AddressDeriver + ?Sized> AddressDeriver for &D {
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Address) -> (Address, u8) {
        (**self).find_program_address(seeds, program_id)
    }
}
