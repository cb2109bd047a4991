use crate::{
    db::{
        index::IndexKey,
        schema::tree_for,
        store::{Mutation, Transaction, load_entity},
    },
    error::{ErrorOrigin, InternalError},
    key::Key,
    obs::sink::{self, MetricsEvent},
    traits::{Entity, PropertyLoadSaver},
};
use std::marker::PhantomData;

///
/// Indexer
///
/// One index-maintenance step run against an open transaction.
///

pub trait Indexer<T: Transaction + ?Sized> {
    fn index(&self, tx: &mut T) -> Result<(), InternalError>;
}

///
/// IndexerFn
/// Closure adapter.
///

pub struct IndexerFn<F>(pub F);

impl<T, F> Indexer<T> for IndexerFn<F>
where
    T: Transaction + ?Sized,
    F: Fn(&mut T) -> Result<(), InternalError>,
{
    fn index(&self, tx: &mut T) -> Result<(), InternalError> {
        (self.0)(tx)
    }
}

///
/// IndexMutationPlan
///
/// Index writes for one entity transition, submitted as a single batch.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexMutationPlan {
    pub mutations: Vec<Mutation>,
    pub inserts: u64,
    pub removes: u64,
}

impl IndexMutationPlan {
    fn insert(&mut self, index_key: IndexKey) {
        let properties = index_key.properties();
        self.mutations.push(Mutation::insert(index_key.key, properties));
        self.inserts += 1;
    }

    fn remove(&mut self, key: Key) {
        self.mutations.push(Mutation::delete(key));
        self.removes += 1;
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Submit the batch; an empty plan touches nothing.
    pub fn submit<T>(self, tx: &mut T, kind: &str) -> Result<(), InternalError>
    where
        T: Transaction + ?Sized,
    {
        if self.is_empty() {
            return Ok(());
        }

        let (inserts, removes) = (self.inserts, self.removes);
        tx.mutate(self.mutations)?;

        sink::record(MetricsEvent::IndexDelta {
            kind,
            inserts,
            removes,
        });

        Ok(())
    }
}

fn require_complete(key: &Key, op: &str) -> Result<(), InternalError> {
    if key.is_incomplete() {
        return Err(InternalError::configuration(
            ErrorOrigin::Index,
            format!("{op} indexer requires a complete key, got {key}"),
        ));
    }

    Ok(())
}

// ============================================================================
// INSERT
// ============================================================================

///
/// InsertIndexer
///
/// Writes one record per index for a new entity. An occupied record fails
/// the batch, which is how unique indexes reject duplicates.
///

pub struct InsertIndexer<'a, E> {
    key: Key,
    entity: &'a E,
}

impl<E: Entity> InsertIndexer<'_, E> {
    pub fn plan(&self) -> Result<IndexMutationPlan, InternalError> {
        let tree = tree_for::<E>();
        let mut plan = IndexMutationPlan::default();

        if tree.is_empty() {
            return Ok(plan);
        }

        for index_key in tree.keys(&self.key, self.entity)? {
            plan.insert(index_key);
        }

        Ok(plan)
    }
}

impl<T, E> Indexer<T> for InsertIndexer<'_, E>
where
    T: Transaction + ?Sized,
    E: Entity,
{
    fn index(&self, tx: &mut T) -> Result<(), InternalError> {
        self.plan()?.submit(tx, &self.key.kind)
    }
}

#[must_use]
pub const fn insert_indexer<E: Entity>(key: Key, entity: &E) -> InsertIndexer<'_, E> {
    InsertIndexer { key, entity }
}

// ============================================================================
// UPDATE
// ============================================================================

///
/// UpdateIndexer
///
/// Diffs the stored value against the new one index by index and moves
/// only the records whose fingerprint changed.
///

pub struct UpdateIndexer<'a, E> {
    key: Key,
    entity: &'a E,
}

impl<E> UpdateIndexer<'_, E>
where
    E: Entity + Default + PropertyLoadSaver,
{
    pub fn plan<T>(&self, tx: &mut T) -> Result<IndexMutationPlan, InternalError>
    where
        T: Transaction + ?Sized,
    {
        require_complete(&self.key, "update")?;

        let tree = tree_for::<E>();
        let mut plan = IndexMutationPlan::default();

        if tree.is_empty() {
            return Ok(plan);
        }

        let Some(previous) = load_entity::<E, T>(tx, &self.key)? else {
            return Ok(plan);
        };

        let before = tree.keys(&self.key, &previous)?;
        let after = tree.keys(&self.key, self.entity)?;

        for (prev, next) in before.into_iter().zip(after) {
            if prev.hash == next.hash {
                continue;
            }

            plan.remove(prev.key);
            plan.insert(next);
        }

        Ok(plan)
    }
}

impl<T, E> Indexer<T> for UpdateIndexer<'_, E>
where
    T: Transaction + ?Sized,
    E: Entity + Default + PropertyLoadSaver,
{
    fn index(&self, tx: &mut T) -> Result<(), InternalError> {
        self.plan(tx)?.submit(tx, &self.key.kind)
    }
}

#[must_use]
pub const fn update_indexer<E: Entity>(key: Key, entity: &E) -> UpdateIndexer<'_, E> {
    UpdateIndexer { key, entity }
}

// ============================================================================
// DELETE
// ============================================================================

///
/// DeleteIndexer
///
/// Removes the records derived from the stored value at `key`. Only the type
/// is needed; the value always comes from the store.
///

pub struct DeleteIndexer<E> {
    key: Key,
    _marker: PhantomData<fn() -> E>,
}

impl<E> DeleteIndexer<E>
where
    E: Entity + Default + PropertyLoadSaver,
{
    pub fn plan<T>(&self, tx: &mut T) -> Result<IndexMutationPlan, InternalError>
    where
        T: Transaction + ?Sized,
    {
        require_complete(&self.key, "delete")?;

        let mut plan = IndexMutationPlan::default();

        let Some(stored) = load_entity::<E, T>(tx, &self.key)? else {
            return Ok(plan);
        };

        let tree = tree_for::<E>();
        for index_key in tree.keys(&self.key, &stored)? {
            plan.remove(index_key.key);
        }

        Ok(plan)
    }
}

impl<T, E> Indexer<T> for DeleteIndexer<E>
where
    T: Transaction + ?Sized,
    E: Entity + Default + PropertyLoadSaver,
{
    fn index(&self, tx: &mut T) -> Result<(), InternalError> {
        self.plan(tx)?.submit(tx, &self.key.kind)
    }
}

#[must_use]
pub const fn delete_indexer<E: Entity>(key: Key) -> DeleteIndexer<E> {
    DeleteIndexer {
        key,
        _marker: PhantomData,
    }
}
