//! Capability traits an application entity implements to take part in
//! index maintenance and uniqueness checks.
//!
//! The engine never relies on a closed type hierarchy: every operation names
//! the smallest capability set it needs.

use crate::{
    db::property::Property, error::InternalError, key::Key, model::field::FieldModel,
    value::Value,
};

// ============================================================================
// ENTITY IDENTITY
// ============================================================================

///
/// EntityKind
///
/// Store addressing of one entity instance.
///

pub trait EntityKind {
    /// Primary key, or `None` when the entity has not been addressed yet.
    fn key(&self) -> Option<&Key>;

    /// Tenant/partition scope the entity lives in.
    fn namespace(&self) -> &str;

    /// Type name used for store addressing.
    fn kind(&self) -> &str;
}

///
/// EntitySchema
///
/// Declared field metadata, in declaration order.
///

pub trait EntitySchema: 'static {
    const FIELDS: &'static [FieldModel];
}

///
/// FieldValues
///
/// Read access to the current value of a declared field by name.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// Entity
///
/// Everything the indexers and the uniqueness checker need.
///

pub trait Entity: EntityKind + EntitySchema + FieldValues {}

impl<T> Entity for T where T: EntityKind + EntitySchema + FieldValues {}

// ============================================================================
// DOCUMENT CODEC
// ============================================================================

///
/// PropertyLoadSaver
///
/// Conversion between an in-memory value and the schemaless property list a
/// store persists.
///

pub trait PropertyLoadSaver {
    /// Load `properties` into `self`. Unknown properties are ignored.
    fn load(&mut self, properties: Vec<Property>) -> Result<(), InternalError>;

    fn save(&self) -> Result<Vec<Property>, InternalError>;
}

///
/// KeyLoader
///
/// Accepts a (re)assigned primary key, e.g. after id allocation.
///

pub trait KeyLoader {
    fn load_key(&mut self, key: Key) -> Result<(), InternalError>;
}
