//! Index maintenance over a transactional document store.
//!
//! Callers own the transaction: planners and checks only read and write
//! through the handle they are given.

pub mod entity;
pub mod index;
pub mod partial;
pub mod property;
pub mod query;
pub mod schema;
pub mod store;
pub mod unique;

pub use entity::{complete_key, prepare};
pub use index::{Indexer, delete_indexer, insert_indexer, update_indexer};
pub use partial::Partial;
pub use property::{Property, PropertyList};
pub use query::{Filter, Query, QueryWindow};
pub use schema::{IndexTree, SchemaCache, tree_for};
pub use store::{KeyAllocator, MemoryStore, MemoryTransaction, Mutation, StoreConfig, Transaction};
pub use unique::{can_insert, check};
