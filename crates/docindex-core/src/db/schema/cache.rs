use crate::{
    db::schema::IndexTree,
    obs::sink::{self, MetricsEvent},
    traits::EntitySchema,
};
use std::{
    any::TypeId,
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

static SCHEMA_CACHE: SchemaCache = SchemaCache::new();

/// Index tree of `E` from the process-wide cache.
#[must_use]
pub fn tree_for<E: EntitySchema>() -> Arc<IndexTree> {
    SCHEMA_CACHE.tree::<E>()
}

///
/// SchemaCache
///
/// Memoising map from entity type to its index tree. One lock covers both
/// lookup and insert-on-miss, so a tree is built at most once per cache.
///

#[derive(Debug, Default)]
pub struct SchemaCache {
    trees: Mutex<BTreeMap<TypeId, Arc<IndexTree>>>,
}

impl SchemaCache {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trees: Mutex::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn tree<E: EntitySchema>(&self) -> Arc<IndexTree> {
        // entries are never mutated after insert, so poison is harmless
        let mut trees = self.trees.lock().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(trees.entry(TypeId::of::<E>()).or_insert_with(|| {
            let tree = IndexTree::from_schema::<E>();
            sink::record(MetricsEvent::SchemaBuild {
                entity: tree.entity(),
                indexes: u64::try_from(tree.len()).unwrap_or(u64::MAX),
            });

            Arc::new(tree)
        }))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
