//! docindex keeps secondary-index records and uniqueness constraints
//! consistent with entity values stored in a transactional document store.
//!
//! ## Crate layout
//! - `core`: values, keys, capability traits, schema cache, index planners,
//!   uniqueness checks, observability and the in-memory store.
//! - `utils`: annotation parsing, hashing and case conversion.
//!
//! A write usually looks like:
//! open a transaction, run `can_insert`, `put` the entity, run the matching
//! indexer against the same transaction, commit.

pub use docindex_core as core;
pub use docindex_utils as utils;

pub use crate::core::{
    PRIMARY_KEY,
    error::{ConstraintKind, ConstraintViolation, ErrorClass, ErrorOrigin, InternalError},
};

/// Crate-wide result alias.
pub type Result<T, E = InternalError> = std::result::Result<T, E>;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        db::{
            Filter, IndexTree, Indexer as _, KeyAllocator as _, MemoryStore, MemoryTransaction,
            Mutation, Partial, Query, QueryWindow, StoreConfig, Transaction as _, can_insert,
            check, complete_key, delete_indexer, insert_indexer, prepare, tree_for,
            update_indexer,
        },
        prelude::*,
    };
}
