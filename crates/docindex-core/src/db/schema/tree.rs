use crate::{
    db::index::{IndexKey, index_keys},
    error::InternalError,
    key::Key,
    model::{
        field::{FieldModel, FieldRef},
        index::Index,
    },
    traits::{EntitySchema, FieldValues},
};
use docindex_utils::{case::kind_name, tag::Tags};

/// Annotation key naming the index a field belongs to.
pub const INDEX_TAG: &str = "index";

/// Annotation key (or `index` option) marking a field unique.
pub const UNIQUE_TAG: &str = "unique";

///
/// IndexTree
///
/// Index definitions of one entity type, in first-declaration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexTree {
    entity: String,
    indexes: Vec<Index>,
    unique_fields: Vec<&'static str>,
}

impl IndexTree {
    /// Scan `fields` in declaration order.
    ///
    /// Fields whose annotations do not parse are treated as unannotated.
    #[must_use]
    pub fn build(entity: impl Into<String>, fields: &'static [FieldModel]) -> Self {
        let mut indexes: Vec<Index> = Vec::new();
        let mut unique_fields = Vec::new();

        for (position, field) in fields.iter().enumerate() {
            let Ok(tags) = Tags::parse(field.tag) else {
                continue;
            };

            let index_tag = tags.get(INDEX_TAG);
            let unique = tags.contains(UNIQUE_TAG)
                || index_tag.is_some_and(|tag| tag.has_option(UNIQUE_TAG));

            if unique {
                unique_fields.push(field.name);
            }

            let Some(tag) = index_tag.filter(|tag| !tag.name.is_empty()) else {
                continue;
            };

            let field_ref = FieldRef {
                name: field.name,
                position,
            };

            if let Some(index) = indexes.iter_mut().find(|index| index.name == tag.name) {
                index.fields.push(field_ref);
                index.unique |= unique;
            } else {
                let mut index = Index::new(tag.name.as_str());
                index.fields.push(field_ref);
                index.unique = unique;
                indexes.push(index);
            }
        }

        Self {
            entity: entity.into(),
            indexes,
            unique_fields,
        }
    }

    /// Build the tree of `E`, labelled with its snake-cased type name.
    #[must_use]
    pub fn from_schema<E: EntitySchema>() -> Self {
        Self::build(kind_name(std::any::type_name::<E>()), E::FIELDS)
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|index| index.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.indexes.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Fields carrying the unique marker, in declaration order.
    #[must_use]
    pub fn unique_fields(&self) -> &[&'static str] {
        &self.unique_fields
    }

    /// Derive every index key of `entity` stored under `primary`, in tree
    /// order.
    pub fn keys<E>(&self, primary: &Key, entity: &E) -> Result<Vec<IndexKey>, InternalError>
    where
        E: FieldValues + ?Sized,
    {
        index_keys(self, primary, entity)
    }
}

impl<'a> IntoIterator for &'a IndexTree {
    type Item = &'a Index;
    type IntoIter = std::slice::Iter<'a, Index>;

    fn into_iter(self) -> Self::IntoIter {
        self.indexes.iter()
    }
}
