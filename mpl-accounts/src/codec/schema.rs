//! Schema declarations.
//!
//! A [`Schema`] is an ordered field list plus a lookup table of the record
//! types its fields may reference. The field order is the byte order on the
//! wire. Schemas compose two ways:
//!
//! - [`SchemaBuilder::extend`] copies a parent's fields as a prefix, so the
//!   child layout is the parent layout plus a suffix.
//! - [`SchemaBuilder::depends_on`] merges another schema's lookup table, so a
//!   field typed [`TypeTag::Record`] can embed that record.
//!
//! # Example
//!
//! ```
//! use mpl_accounts::codec::{Record, Schema, TypeTag, Value};
//!
//! let v2 = Schema::builder("MasterEditionV2")
//!     .field("key", TypeTag::U8)
//!     .field("supply", TypeTag::U64)
//!     .field("max_supply", TypeTag::optional(TypeTag::U64))
//!     .build()
//!     .unwrap();
//!
//! let v1 = Schema::builder("MasterEditionV1")
//!     .extend(&v2)
//!     .field("printing_mint", TypeTag::PublicKey)
//!     .transform(|record: &mut Record| record.set("key", Value::U8(2)))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(v1.fields().len(), 4);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::scalar::Scalar;
use super::value::Record;
use crate::error::Error;

/// Post-decode hook applied to the draft record of a layout.
pub type Transform = fn(&mut Record);

/// Wire type of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    U8,
    U16,
    U32,
    U64,
    U128,
    Bool,
    /// Exactly `n` raw bytes, no length prefix.
    FixedBytes(usize),
    /// One presence byte, then the inner value when present.
    Optional(Box<TypeTag>),
    /// 32 raw bytes, held in memory as base58 text.
    PublicKey,
    /// A record type resolved through the schema's lookup table.
    Record(String),
}

impl TypeTag {
    pub fn optional(inner: TypeTag) -> Self {
        TypeTag::Optional(Box::new(inner))
    }

    pub fn record(name: &str) -> Self {
        TypeTag::Record(name.to_string())
    }

    /// The registry entry for fixed-width scalar tags.
    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            TypeTag::U8 => Some(Scalar::U8),
            TypeTag::U16 => Some(Scalar::U16),
            TypeTag::U32 => Some(Scalar::U32),
            TypeTag::U64 => Some(Scalar::U64),
            TypeTag::U128 => Some(Scalar::U128),
            TypeTag::Bool => Some(Scalar::Bool),
            TypeTag::PublicKey => Some(Scalar::PublicKey),
            TypeTag::FixedBytes(_) | TypeTag::Optional(_) | TypeTag::Record(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeTag,
}

impl Field {
    pub fn new(name: &str, ty: TypeTag) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// One entry of a lookup table: a record type's fields and transform.
#[derive(Clone)]
pub struct Layout {
    pub(crate) fields: Vec<Field>,
    pub(crate) transform: Option<Transform>,
}

impl Layout {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn same_as(&self, other: &Layout) -> bool {
        let transform = match (self.transform, other.transform) {
            (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        transform && self.fields == other.fields
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("fields", &self.fields)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

pub(crate) type Lookup = BTreeMap<String, Arc<Layout>>;

/// A record layout with the record types it can reference.
#[derive(Clone, Debug)]
pub struct Schema {
    name: String,
    layout: Arc<Layout>,
    lookup: Lookup,
}

impl Schema {
    /// Build a schema from an ordered field list.
    ///
    /// The lookup table is this schema's own entry merged with the table of
    /// every dependency.
    ///
    /// # Errors
    ///
    /// [`Error::SchemaConstruction`] if a field name repeats, or if two
    /// different layouts are registered under the same record type name.
    pub fn new(
        name: &str,
        fields: Vec<Field>,
        dependencies: &[&Schema],
        transform: Option<Transform>,
    ) -> Result<Self, Error> {
        let mut lookup = Lookup::new();
        for dependency in dependencies {
            merge(&mut lookup, &dependency.lookup)?;
        }
        Self::assemble(name, fields, lookup, transform)
    }

    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            fields: Vec::new(),
            lookup: Lookup::new(),
            transform: None,
            error: None,
        }
    }

    fn assemble(
        name: &str,
        fields: Vec<Field>,
        mut lookup: Lookup,
        transform: Option<Transform>,
    ) -> Result<Self, Error> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(Error::SchemaConstruction(format!(
                    "duplicate field {} in {name}",
                    field.name
                )));
            }
        }

        let layout = Arc::new(Layout { fields, transform });
        let own = Lookup::from([(name.to_string(), layout.clone())]);
        merge(&mut lookup, &own)?;

        Ok(Self {
            name: name.to_string(),
            layout,
            lookup,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.layout.fields
    }

    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The layout registered for a record type name.
    pub fn resolve(&self, name: &str) -> Option<&Layout> {
        self.lookup.get(name).map(Arc::as_ref)
    }

    /// Names of every record type this schema can resolve, itself included.
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.lookup.keys().map(String::as_str)
    }

    pub(crate) fn lookup(&self) -> &Lookup {
        &self.lookup
    }
}

/// Fold `from` into `into`. The same layout may arrive twice through
/// different dependencies; a different layout under a taken name may not.
/// Layouts are the same when both their fields and their transform agree.
fn merge(into: &mut Lookup, from: &Lookup) -> Result<(), Error> {
    for (name, layout) in from {
        match into.get(name) {
            Some(existing) if Arc::ptr_eq(existing, layout) => {}
            Some(existing) if existing.same_as(layout) => {}
            Some(_) => {
                return Err(Error::SchemaConstruction(format!(
                    "conflicting definitions for record type {name}"
                )))
            }
            None => {
                into.insert(name.clone(), layout.clone());
            }
        }
    }
    Ok(())
}

/// Fluent construction of a [`Schema`].
///
/// Errors are held until [`build`](Self::build).
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    lookup: Lookup,
    transform: Option<Transform>,
    error: Option<Error>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: &str, ty: TypeTag) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Copy `parent`'s fields, in order, plus the record types they use.
    /// The parent's transform is not inherited.
    pub fn extend(mut self, parent: &Schema) -> Self {
        self.fields.extend(parent.fields().iter().cloned());
        let inherited: Lookup = parent
            .lookup
            .iter()
            .filter(|(name, _)| *name != &parent.name)
            .map(|(name, layout)| (name.clone(), layout.clone()))
            .collect();
        self.absorb(&inherited)
    }

    /// Register `dependency` and the record types it references.
    pub fn depends_on(self, dependency: &Schema) -> Self {
        self.absorb(&dependency.lookup)
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn build(self) -> Result<Schema, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Schema::assemble(&self.name, self.fields, self.lookup, self.transform)
    }

    fn absorb(mut self, entries: &Lookup) -> Self {
        if self.error.is_none() {
            if let Err(error) = merge(&mut self.lookup, entries) {
                self.error = Some(error);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;

    fn state() -> Schema {
        Schema::builder("State")
            .field("status", TypeTag::U8)
            .field("count", TypeTag::U64)
            .build()
            .unwrap()
    }

    #[test]
    fn test_duplicate_field() {
        let result = Schema::builder("Broken")
            .field("key", TypeTag::U8)
            .field("key", TypeTag::U64)
            .build();
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));
    }

    #[test]
    fn test_duplicate_inherited_field() {
        let parent = Schema::builder("Parent")
            .field("key", TypeTag::U8)
            .field("supply", TypeTag::U64)
            .build()
            .unwrap();
        let result = Schema::builder("Child")
            .extend(&parent)
            .field("supply", TypeTag::U64)
            .build();
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));
    }

    #[test]
    fn test_extend_preserves_prefix() {
        let parent = Schema::builder("Parent")
            .field("key", TypeTag::U8)
            .field("supply", TypeTag::U64)
            .transform(|record| record.set("key", Value::U8(6)))
            .build()
            .unwrap();
        let child = Schema::builder("Child")
            .extend(&parent)
            .field("mint", TypeTag::PublicKey)
            .build()
            .unwrap();

        assert_eq!(&child.fields()[..2], parent.fields());
        assert_eq!(child.fields()[2], Field::new("mint", TypeTag::PublicKey));
        assert!(child.layout().transform.is_none());
        assert!(child.resolve("Parent").is_none());
    }

    #[test]
    fn test_dependency_merge() {
        let state = state();
        let manager = Schema::builder("Manager")
            .field("key", TypeTag::U8)
            .field("state", TypeTag::record("State"))
            .depends_on(&state)
            .build()
            .unwrap();

        let registered: Vec<_> = manager.registered().collect();
        assert_eq!(registered, ["Manager", "State"]);
        assert_eq!(manager.resolve("State").unwrap().fields(), state.fields());

        // A schema that depends on `Manager` sees `State` too.
        let outer = Schema::new(
            "Outer",
            vec![Field::new("manager", TypeTag::record("Manager"))],
            &[&manager],
            None,
        )
        .unwrap();
        assert!(outer.resolve("State").is_some());
        assert!(outer.resolve("Manager").is_some());
    }

    #[test]
    fn test_diamond_dependency() {
        let state = state();
        let left = Schema::builder("Left")
            .field("state", TypeTag::record("State"))
            .depends_on(&state)
            .build()
            .unwrap();
        let right = Schema::builder("Right")
            .field("state", TypeTag::record("State"))
            .depends_on(&state)
            .build()
            .unwrap();
        assert!(Schema::new("Both", Vec::new(), &[&left, &right], None).is_ok());
    }

    #[test]
    fn test_conflicting_dependency() {
        let state = state();
        let other = Schema::builder("State")
            .field("status", TypeTag::U16)
            .build()
            .unwrap();
        let result = Schema::builder("Manager")
            .depends_on(&state)
            .depends_on(&other)
            .build();
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));

        // A schema cannot shadow one of its own dependencies either.
        let result = Schema::new("State", Vec::new(), &[&state], None);
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));
    }

    fn reset(record: &mut Record) {
        record.set("status", Value::U8(0));
    }

    fn bump(record: &mut Record) {
        record.set("count", Value::U64(1));
    }

    fn state_with(transform: Option<Transform>) -> Schema {
        Schema::new(
            "State",
            vec![
                Field::new("status", TypeTag::U8),
                Field::new("count", TypeTag::U64),
            ],
            &[],
            transform,
        )
        .unwrap()
    }

    #[test]
    fn test_same_fields_different_transform_conflict() {
        let plain = state_with(None);
        let resetting = state_with(Some(reset));
        let result = Schema::builder("Manager")
            .depends_on(&plain)
            .depends_on(&resetting)
            .build();
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));

        let bumping = state_with(Some(bump));
        let result = Schema::builder("Manager")
            .depends_on(&resetting)
            .depends_on(&bumping)
            .build();
        assert!(matches!(result, Err(Error::SchemaConstruction(_))));

        // Separately built but identical layouts still merge.
        let again = state_with(Some(reset));
        let manager = Schema::builder("Manager")
            .depends_on(&resetting)
            .depends_on(&again)
            .build()
            .unwrap();
        assert!(manager.resolve("State").unwrap().transform.is_some());
    }
}
