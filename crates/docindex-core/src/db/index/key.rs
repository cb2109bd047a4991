use crate::{
    db::{index::fingerprint, property::Property, schema::IndexTree},
    error::{ErrorOrigin, InternalError},
    key::Key,
    traits::FieldValues,
};

/// Kind of the root of every derived index key; named by the entity kind.
pub const INDEX_KIND_KIND: &str = "IndexKind";

/// Kind of the middle link; named by the index name.
pub const INDEX_NAME_KIND: &str = "IndexName";

/// Kind of the index record itself; named by the decimal fingerprint.
pub const INDEX_ENTRY_KIND: &str = "IndexEntry";

/// The single property stored on an index record.
pub const HASH_PROPERTY: &str = "hash";

///
/// IndexKey
///
/// Derived store key of one index record plus the fingerprint it encodes.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexKey {
    pub key: Key,
    pub hash: u64,
}

impl IndexKey {
    /// Document written at `key`.
    #[must_use]
    pub fn properties(&self) -> Vec<Property> {
        vec![Property::new(HASH_PROPERTY, self.hash)]
    }
}

/// Derive the record key for `hash` in index `index_name` of `primary`'s kind.
///
/// The key does not embed the primary id, so two entities with the same
/// tuple address the same record.
#[must_use]
pub fn derive_key(primary: &Key, index_name: &str, hash: u64) -> Key {
    let kind = Key::name(INDEX_KIND_KIND, primary.kind.as_str());
    let name = Key::name(INDEX_NAME_KIND, index_name).with_parent(kind);

    Key::name(INDEX_ENTRY_KIND, hash.to_string())
        .with_parent(name)
        .with_namespace(&primary.namespace)
}

/// Derive one key per index of `tree`, in tree order.
pub fn index_keys<E>(
    tree: &IndexTree,
    primary: &Key,
    entity: &E,
) -> Result<Vec<IndexKey>, InternalError>
where
    E: FieldValues + ?Sized,
{
    if primary.kind.is_empty() {
        return Err(InternalError::configuration(
            ErrorOrigin::Index,
            format!("primary key {primary} has no kind"),
        ));
    }

    tree.iter()
        .map(|index| {
            let hash = fingerprint(index, entity)?;

            Ok(IndexKey {
                key: derive_key(primary, &index.name, hash),
                hash,
            })
        })
        .collect()
}
