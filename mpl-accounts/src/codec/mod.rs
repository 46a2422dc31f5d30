//! Schema-driven binary codec.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Scalar`] | Static registry of fixed-width wire types |
//! | [`Schema`] | Ordered field list plus referenced record types |
//! | [`decode`] / [`encode`] | Walk a schema over bytes or a [`Record`] |

pub mod engine;
pub mod scalar;
pub mod schema;
mod value;

pub use engine::{decode, encode, encoded_len};
pub use scalar::{address_from_text, address_to_text, Scalar, ScalarCodec, PUBLIC_KEY_LEN};
pub use schema::{Field, Layout, Schema, SchemaBuilder, Transform, TypeTag};
pub use value::{Record, Value};
