//! Module: store
//! Responsibility: the transactional document-store boundary the index
//! engine talks to, and an in-memory reference implementation.
//! Does not own: transaction lifecycle; callers begin and commit.

mod config;
mod memory;
mod row;

#[cfg(test)]
mod tests;

use crate::{
    db::{property::Property, query::Query},
    error::InternalError,
    key::Key,
    traits::PropertyLoadSaver,
};

pub use config::StoreConfig;
pub use memory::{MemoryStore, MemoryTransaction};
pub use row::RawRow;

///
/// Mutation
///
/// One write inside a batch. Batches apply all-or-nothing.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Create; fails with `AlreadyExists` when the key is occupied.
    Insert { key: Key, properties: Vec<Property> },
    /// Create or replace.
    Upsert { key: Key, properties: Vec<Property> },
    /// Replace; fails with `NotFound` when the key is vacant.
    Update { key: Key, properties: Vec<Property> },
    /// Remove; removing a vacant key succeeds.
    Delete { key: Key },
}

impl Mutation {
    #[must_use]
    pub const fn insert(key: Key, properties: Vec<Property>) -> Self {
        Self::Insert { key, properties }
    }

    #[must_use]
    pub const fn upsert(key: Key, properties: Vec<Property>) -> Self {
        Self::Upsert { key, properties }
    }

    #[must_use]
    pub const fn update(key: Key, properties: Vec<Property>) -> Self {
        Self::Update { key, properties }
    }

    #[must_use]
    pub const fn delete(key: Key) -> Self {
        Self::Delete { key }
    }

    #[must_use]
    pub const fn key(&self) -> &Key {
        match self {
            Self::Insert { key, .. }
            | Self::Upsert { key, .. }
            | Self::Update { key, .. }
            | Self::Delete { key } => key,
        }
    }

    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

///
/// Transaction
///
/// Handle to one open store transaction. Reads observe the transaction's
/// snapshot; writes become visible to others only when the owner commits.
///

pub trait Transaction {
    /// Query result stream; `None` signals exhaustion.
    type Keys: Iterator<Item = Result<Key, InternalError>>;

    /// Read one document. A miss is reported as a not-found error
    /// (see [`InternalError::is_not_found`]).
    fn get(&mut self, key: &Key) -> Result<Vec<Property>, InternalError>;

    /// Apply a batch atomically, returning the (completed) key of each
    /// mutation in order.
    fn mutate(&mut self, mutations: Vec<Mutation>) -> Result<Vec<Key>, InternalError>;

    /// Run a keys-only query against the transaction snapshot.
    fn run_keys(&mut self, query: &Query) -> Result<Self::Keys, InternalError>;

    /// Create or replace one document.
    fn put(&mut self, key: &Key, properties: Vec<Property>) -> Result<Key, InternalError> {
        self.mutate(vec![Mutation::upsert(key.clone(), properties)])?
            .pop()
            .ok_or_else(|| InternalError::store_internal("put returned no key"))
    }

    /// Remove one document.
    fn delete(&mut self, key: &Key) -> Result<(), InternalError> {
        self.mutate(vec![Mutation::delete(key.clone())])
            .map(|_| ())
    }
}

///
/// KeyAllocator
///
/// Assigns ids to incomplete keys.
///

pub trait KeyAllocator {
    fn allocate_ids(&self, keys: &[Key]) -> Result<Vec<Key>, InternalError>;
}

/// Read and decode the entity stored at `key`; a miss yields `None`.
pub fn load_entity<E, T>(tx: &mut T, key: &Key) -> Result<Option<E>, InternalError>
where
    E: Default + PropertyLoadSaver,
    T: Transaction + ?Sized,
{
    let properties = match tx.get(key) {
        Ok(properties) => properties,
        Err(err) if err.is_not_found() => return Ok(None),
        Err(err) => return Err(err),
    };

    let mut entity = E::default();
    entity.load(properties)?;

    Ok(Some(entity))
}
