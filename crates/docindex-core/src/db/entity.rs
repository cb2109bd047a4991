//! Entity preparation and key completion ahead of a write.

use crate::{
    db::store::KeyAllocator,
    error::InternalError,
    key::Key,
    traits::{EntityKind, KeyLoader},
};

/// Stamp the entity's kind on its key and its namespace on the whole key
/// chain. Entities without a key are left alone.
pub fn prepare<E>(entity: &mut E) -> Result<(), InternalError>
where
    E: EntityKind + KeyLoader + ?Sized,
{
    let Some(key) = entity.key() else {
        return Ok(());
    };

    let mut key = key.clone();
    entity.kind().clone_into(&mut key.kind);
    key.set_namespace(entity.namespace());

    entity.load_key(key)
}

/// Return `key` if complete; otherwise allocate an id, hand the completed
/// key to the entity and return it.
pub fn complete_key<A, E>(allocator: &A, key: &Key, entity: &mut E) -> Result<Key, InternalError>
where
    A: KeyAllocator + ?Sized,
    E: KeyLoader + ?Sized,
{
    if key.is_complete() {
        return Ok(key.clone());
    }

    let completed = allocator
        .allocate_ids(std::slice::from_ref(key))?
        .pop()
        .ok_or_else(|| InternalError::store_internal(format!("no id allocated for {key}")))?;

    entity.load_key(completed.clone())?;

    Ok(completed)
}

///
/// TESTS
///
