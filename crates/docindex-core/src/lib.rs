//! Core runtime for docindex: values, keys, entity capability traits, the
//! schema cache, index maintenance, uniqueness checks and an in-memory store.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod key;
pub mod model;
pub mod obs;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Reserved pseudo-field naming an entity's primary key.
pub const PRIMARY_KEY: &str = "__key__";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No stores, planners or errors are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::property::{Property, PropertyList},
        key::{Key, KeyId},
        model::field::FieldModel,
        traits::{
            Entity, EntityKind, EntitySchema, FieldValues, KeyLoader, PropertyLoadSaver,
        },
        value::Value,
    };
}
