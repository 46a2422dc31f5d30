//! Procedural macros for mpl-accounts.
//!
//! # Available Macros
//!
//! | Macro | Type | Purpose |
//! |-------|------|---------|
//! | [`account_keys`] | Attribute | Per-program discriminant enum + program identity |
//!
//! # Quick Start
//!
//! ```ignore
//! use mpl_accounts::account_keys;
//!
//! #[account_keys(
//!     program = MetadataProgram,
//!     id = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s",
//!     prefix = "metadata"
//! )]
//! pub enum MetadataKey {
//!     Uninitialized = 0,
//!     EditionV1 = 1,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitStr};

/// Attribute macro for a program's account discriminant enum.
///
/// # Generated Items
///
/// | Item | Type | Description |
/// |------|------|-------------|
/// | `ID` | `Address` | Program ID constant |
/// | `id()` | `fn` | Returns `&'static Address` |
/// | `program` | `struct` | Zero-sized type implementing `mpl_accounts::Program` |
/// | `TryFrom<u8>` | `impl` | Unknown bytes become `InvalidAccountData` |
/// | `From<Key> for u8` | `impl` | Discriminant byte of a key |
/// | `check()` | `fn` | Whether account data leads with a given key |
///
/// The enum itself gains `#[repr(u8)]` and `Clone, Copy, Debug, PartialEq,
/// Eq, Hash`.
///
/// # Errors
///
/// Compile-time errors if:
/// - Applied to a non-enum type, or to an enum with data-carrying variants
/// - `program`, `id` or `prefix` is missing
/// - A variant lacks an explicit discriminant value
#[proc_macro_attribute]
pub fn account_keys(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut program: Option<Ident> = None;
    let mut id: Option<LitStr> = None;
    let mut prefix: Option<LitStr> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("program") {
            program = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("id") {
            id = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("prefix") {
            prefix = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("expected `program`, `id` or `prefix`"));
        }
        Ok(())
    });
    parse_macro_input!(attr with parser);

    let input = parse_macro_input!(item as DeriveInput);
    match expand(program, id, prefix, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(
    program: Option<Ident>,
    id: Option<LitStr>,
    prefix: Option<LitStr>,
    input: DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    let missing = |name: &str| {
        syn::Error::new(
            Span::call_site(),
            format!("account_keys requires `{name} = ...`"),
        )
    };
    let program = program.ok_or_else(|| missing("program"))?;
    let id = id.ok_or_else(|| missing("id"))?;
    let prefix = prefix.ok_or_else(|| missing("prefix"))?;

    let enum_name = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let kind = enum_name.to_string();

    let variants = match &input.data {
        Data::Enum(data_enum) => &data_enum.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                enum_name,
                "account_keys can only be applied to enums",
            ))
        }
    };

    let mut variant_defs = Vec::with_capacity(variants.len());
    let mut try_from_arms = Vec::with_capacity(variants.len());
    for variant in variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "account_keys variants cannot carry data",
            ));
        }
        let name = &variant.ident;
        let (_, disc) = variant.discriminant.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(variant, "account_keys requires explicit discriminant values")
        })?;
        let variant_attrs = &variant.attrs;
        variant_defs.push(quote! { #(#variant_attrs)* #name = #disc });
        try_from_arms.push(quote! { #disc => Ok(#enum_name::#name), });
    }

    Ok(quote! {
        /// Program ID
        pub const ID: ::solana_address::Address =
            ::solana_address::Address::new_from_array(::pinocchio_pubkey::pubkey!(#id));

        /// Returns the program ID.
        #[inline]
        pub fn id() -> &'static ::solana_address::Address {
            &ID
        }

        /// Program identity that owns these accounts.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct #program;

        impl ::mpl_accounts::Program for #program {
            const ID: ::solana_address::Address = ID;
            const PREFIX: &'static str = #prefix;
        }

        #(#attrs)*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #vis enum #enum_name {
            #(#variant_defs),*
        }

        impl ::core::convert::TryFrom<u8> for #enum_name {
            type Error = ::mpl_accounts::Error;

            #[inline]
            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    #(#try_from_arms)*
                    found => Err(::mpl_accounts::Error::InvalidAccountData(
                        ::mpl_accounts::DataError::UnknownDiscriminant { kind: #kind, found },
                    )),
                }
            }
        }

        impl ::core::convert::From<#enum_name> for u8 {
            #[inline]
            fn from(key: #enum_name) -> u8 {
                key as u8
            }
        }

        impl #enum_name {
            /// Whether `data` leads with the discriminant of `expected`.
            #[inline]
            pub fn check(data: &[u8], expected: Self) -> bool {
                ::mpl_accounts::check_discriminator(data, expected as u8)
            }
        }
    })
}
