//! In-memory transactional store.
//!
//! Transactions read from a snapshot taken at `begin`, see their own pending
//! writes, and commit optimistically: every key a transaction read, queried
//! or wrote is version-checked at commit and any concurrent change aborts.
//! Executed queries are re-run against committed rows, so a row that starts
//! matching a query after the snapshot also aborts the commit.

use crate::{
    db::{
        property::Property,
        query::Query,
        store::{KeyAllocator, Mutation, StoreConfig, Transaction, row::RawRow},
    },
    error::{ErrorOrigin, InternalError},
    key::{Key, KeyId},
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

// version 0 stands for "absent"
const ABSENT: u64 = 0;

///
/// VersionedRow
///

#[derive(Clone, Debug)]
struct VersionedRow {
    row: RawRow,
    version: u64,
}

///
/// StoreState
///

#[derive(Debug)]
struct StoreState {
    rows: BTreeMap<Key, VersionedRow>,
    version: u64,
    next_id: i64,
}

///
/// MemoryStore
///
/// Cheap to clone; clones share the same committed state.
///

#[derive(Clone, Debug)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    config: StoreConfig,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                rows: BTreeMap::new(),
                version: ABSENT,
                next_id: config.first_id,
            })),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open a transaction over the current committed state.
    #[must_use]
    pub fn begin(&self) -> MemoryTransaction {
        let snapshot = self.lock().rows.clone();

        MemoryTransaction {
            store: self.clone(),
            snapshot,
            pending: BTreeMap::new(),
            observed: BTreeMap::new(),
            queried: Vec::new(),
        }
    }

    /// Run `f` in a fresh transaction and commit it, retrying when the
    /// commit aborts on a concurrent modification.
    ///
    /// Errors returned by `f` roll the transaction back and are not retried.
    pub fn run_in_transaction<T, F>(&self, mut f: F) -> Result<T, InternalError>
    where
        F: FnMut(&mut MemoryTransaction) -> Result<T, InternalError>,
    {
        let attempts = self.config.attempts();
        let mut attempt = 1;

        loop {
            let mut tx = self.begin();
            let out = f(&mut tx)?;

            match tx.commit() {
                Ok(()) => return Ok(out),
                Err(err) if err.is_aborted() && attempt < attempts => attempt += 1,
                Err(err) => return Err(err),
            }
        }
    }

    /// Read committed state outside any transaction.
    pub fn get(&self, key: &Key) -> Result<Option<Vec<Property>>, InternalError> {
        self.lock()
            .rows
            .get(key)
            .map(|versioned| versioned.row.decode())
            .transpose()
    }

    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.lock().rows.contains_key(key)
    }

    /// Committed keys of `kind`, in key order.
    #[must_use]
    pub fn keys_of(&self, kind: &str) -> Vec<Key> {
        self.lock()
            .rows
            .keys()
            .filter(|key| key.kind == kind)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    // Rows are replaced wholesale on commit, so a poisoned guard still holds
    // a consistent state.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate(&self, key: &Key) -> Key {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id = state.next_id.saturating_add(1);

        Key {
            id: KeyId::Id(id),
            ..key.clone()
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl KeyAllocator for MemoryStore {
    fn allocate_ids(&self, keys: &[Key]) -> Result<Vec<Key>, InternalError> {
        keys.iter()
            .map(|key| {
                if key.is_complete() {
                    return Err(InternalError::configuration(
                        ErrorOrigin::Store,
                        format!("cannot allocate an id for complete key {key}"),
                    ));
                }

                Ok(self.allocate(key))
            })
            .collect()
    }
}

///
/// MemoryTransaction
///

#[derive(Debug)]
pub struct MemoryTransaction {
    store: MemoryStore,
    snapshot: BTreeMap<Key, VersionedRow>,
    /// `None` marks a pending delete.
    pending: BTreeMap<Key, Option<Vec<Property>>>,
    /// Snapshot version of every key this transaction depends on.
    observed: BTreeMap<Key, u64>,
    /// Executed queries with their unwindowed snapshot matches.
    queried: Vec<(Query, Vec<Key>)>,
}

impl MemoryTransaction {
    /// Apply pending writes, or abort when any observed key changed since
    /// the snapshot was taken.
    pub fn commit(self) -> Result<(), InternalError> {
        let mut state = self.store.lock();

        for (key, seen) in &self.observed {
            let current = state.rows.get(key).map_or(ABSENT, |row| row.version);
            if current != *seen {
                return Err(InternalError::store_aborted(format!(
                    "concurrent modification of {key}"
                )));
            }
        }

        for (query, seen) in &self.queried {
            if matching_keys(&state.rows, query)? != *seen {
                return Err(InternalError::store_aborted(format!(
                    "concurrent modification of rows matching a '{}' query",
                    query.kind
                )));
            }
        }

        if self.pending.is_empty() {
            return Ok(());
        }

        // encode before touching committed state
        let mut writes = Vec::with_capacity(self.pending.len());
        for (key, properties) in self.pending {
            let row = properties.as_deref().map(RawRow::encode).transpose()?;
            writes.push((key, row));
        }

        state.version += 1;
        let version = state.version;

        for (key, row) in writes {
            match row {
                Some(row) => {
                    state.rows.insert(key, VersionedRow { row, version });
                }
                None => {
                    state.rows.remove(&key);
                }
            }
        }

        Ok(())
    }

    /// Discard pending writes.
    pub fn rollback(self) {}

    /// Number of pending writes (deletes included).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn observe(&mut self, key: &Key) {
        if !self.observed.contains_key(key) {
            let version = self.snapshot.get(key).map_or(ABSENT, |row| row.version);
            self.observed.insert(key.clone(), version);
        }
    }

    // Merged view of `key`: staged writes shadow the snapshot.
    fn lookup(
        &self,
        staged: &BTreeMap<Key, Option<Vec<Property>>>,
        key: &Key,
    ) -> Result<Option<Vec<Property>>, InternalError> {
        if let Some(entry) = staged.get(key) {
            return Ok(entry.clone());
        }

        self.snapshot
            .get(key)
            .map(|versioned| versioned.row.decode())
            .transpose()
    }

    fn exists(&self, staged: &BTreeMap<Key, Option<Vec<Property>>>, key: &Key) -> bool {
        staged.get(key).map_or_else(
            || self.snapshot.contains_key(key),
            Option::is_some,
        )
    }

    fn complete(&self, key: &Key) -> Result<Key, InternalError> {
        if !key.is_valid() {
            return Err(InternalError::configuration(
                ErrorOrigin::Store,
                format!("invalid key {key}"),
            ));
        }

        if key.is_incomplete() {
            return Ok(self.store.allocate(key));
        }

        Ok(key.clone())
    }
}

impl Transaction for MemoryTransaction {
    type Keys = std::vec::IntoIter<Result<Key, InternalError>>;

    fn get(&mut self, key: &Key) -> Result<Vec<Property>, InternalError> {
        if key.is_incomplete() {
            return Err(InternalError::configuration(
                ErrorOrigin::Store,
                format!("cannot read incomplete key {key}"),
            ));
        }

        self.observe(key);

        self.lookup(&self.pending, key)?
            .ok_or_else(|| InternalError::store_not_found(key.to_string()))
    }

    fn mutate(&mut self, mutations: Vec<Mutation>) -> Result<Vec<Key>, InternalError> {
        let mut staged = self.pending.clone();
        let mut keys = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            let (key, entry) = match mutation {
                Mutation::Insert { key, properties } => {
                    let key = self.complete(&key)?;
                    if self.exists(&staged, &key) {
                        return Err(InternalError::store_already_exists(key.to_string()));
                    }
                    (key, Some(properties))
                }
                Mutation::Upsert { key, properties } => (self.complete(&key)?, Some(properties)),
                Mutation::Update { key, properties } => {
                    let key = self.complete(&key)?;
                    if !self.exists(&staged, &key) {
                        return Err(InternalError::store_not_found(key.to_string()));
                    }
                    (key, Some(properties))
                }
                Mutation::Delete { key } => {
                    if key.is_incomplete() {
                        return Err(InternalError::configuration(
                            ErrorOrigin::Store,
                            format!("cannot delete incomplete key {key}"),
                        ));
                    }
                    (key, None)
                }
            };

            staged.insert(key.clone(), entry);
            keys.push(key);
        }

        for key in &keys {
            self.observe(key);
        }
        self.pending = staged;

        Ok(keys)
    }

    fn run_keys(&mut self, query: &Query) -> Result<Self::Keys, InternalError> {
        let candidates: Vec<Key> = self
            .snapshot
            .keys()
            .chain(self.pending.keys())
            .filter(|key| key.kind == query.kind && key.namespace == query.namespace)
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut matched = Vec::new();
        for key in candidates {
            if let Some(properties) = self.lookup(&self.pending, &key)?
                && query.matches(&key, &properties)
            {
                matched.push(key);
            }
        }

        let window: Vec<Key> = matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();

        for key in &window {
            self.observe(key);
        }

        let seen = matching_keys(&self.snapshot, query)?;
        self.queried.push((query.clone(), seen));

        Ok(window
            .into_iter()
            .map(Ok)
            .collect::<Vec<_>>()
            .into_iter())
    }
}

// Keys of committed rows matching `query`, ignoring its window.
fn matching_keys(
    rows: &BTreeMap<Key, VersionedRow>,
    query: &Query,
) -> Result<Vec<Key>, InternalError> {
    let mut keys = Vec::new();

    for (key, versioned) in rows {
        if key.kind != query.kind || key.namespace != query.namespace {
            continue;
        }
        if query.matches(key, &versioned.row.decode()?) {
            keys.push(key.clone());
        }
    }

    Ok(keys)
}
