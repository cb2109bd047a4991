//! Module: index
//! Responsibility: fingerprints, derived index keys and the insert / update /
//! delete planners that keep index records in step with entity values.
//! Does not own: schema scanning or transaction lifecycle.
//!
//! Invariants:
//! - One planner call submits at most one batch.
//! - Every read and write goes through the caller's transaction.

mod fingerprint;
mod key;
mod plan;


pub use fingerprint::{fingerprint, hash_value};
pub use key::{
    HASH_PROPERTY, INDEX_ENTRY_KIND, INDEX_KIND_KIND, INDEX_NAME_KIND, IndexKey, derive_key,
    index_keys,
};
pub use plan::{
    DeleteIndexer, IndexMutationPlan, Indexer, IndexerFn, InsertIndexer, UpdateIndexer,
    delete_indexer, insert_indexer, update_indexer,
};
