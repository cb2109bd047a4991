use crate::{
    db::property::Property,
    error::InternalError,
    key::Key,
    traits::{KeyLoader, PropertyLoadSaver},
};

///
/// Partial
///
/// Projection over an entity for selective hydration. Loading skips the
/// listed property names, so those fields keep their in-memory value while
/// everything else is refreshed from the stored document.
///

pub struct Partial<'a, E: ?Sized> {
    skipped: Vec<String>,
    entity: &'a mut E,
}

impl<'a, E: ?Sized> Partial<'a, E> {
    pub const fn new(entity: &'a mut E) -> Self {
        Self {
            skipped: Vec::new(),
            entity,
        }
    }

    /// Keep the current in-memory value of `names` on load.
    #[must_use]
    pub fn skip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skipped.extend(names.into_iter().map(Into::into));
        self.skipped.sort_unstable();
        self.skipped.dedup();
        self
    }

    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}

impl<E: PropertyLoadSaver + ?Sized> PropertyLoadSaver for Partial<'_, E> {
    fn load(&mut self, properties: Vec<Property>) -> Result<(), InternalError> {
        let kept = properties
            .into_iter()
            .filter(|property| {
                self.skipped
                    .binary_search_by(|name| name.as_str().cmp(&property.name))
                    .is_err()
            })
            .collect();

        self.entity.load(kept)
    }

    fn save(&self) -> Result<Vec<Property>, InternalError> {
        self.entity.save()
    }
}

impl<E: KeyLoader + ?Sized> KeyLoader for Partial<'_, E> {
    fn load_key(&mut self, key: Key) -> Result<(), InternalError> {
        self.entity.load_key(key)
    }
}

///
/// TESTS
///
