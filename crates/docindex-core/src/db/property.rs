use crate::{error::InternalError, traits::PropertyLoadSaver, value::Value};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

///
/// Property
/// One named value of a stored document.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

///
/// PropertyList
///
/// Property list kept sorted by name. The first property appended under a
/// name wins; later duplicates are ignored.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert `property` at its sorted position unless the name is present.
    pub fn append(&mut self, property: Property) {
        if let Err(pos) = self
            .0
            .binary_search_by(|probe| probe.name.as_str().cmp(&property.name))
        {
            self.0.insert(pos, property);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .binary_search_by(|probe| probe.name.as_str().cmp(name))
            .ok()
            .map(|pos| &self.0[pos].value)
    }

    /// Append the saved properties of `source`, restricted to `names` when
    /// any are given.
    pub fn load_from<S>(&mut self, source: &S, names: &[&str]) -> Result<(), InternalError>
    where
        S: PropertyLoadSaver + ?Sized,
    {
        let properties = source.save()?;

        if names.is_empty() {
            return self.load(properties);
        }

        let selected = properties
            .into_iter()
            .filter(|property| names.contains(&property.name.as_str()))
            .collect();

        self.load(selected)
    }

    /// Load this list into `target`.
    ///
    /// Fields of `target` with no matching property keep their current value,
    /// so callers usually start from a default-constructed target.
    pub fn load_into<T>(&self, target: &mut T) -> Result<(), InternalError>
    where
        T: PropertyLoadSaver + ?Sized,
    {
        target.load(self.0.clone())
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Property> {
        self.0
    }
}

impl From<Vec<Property>> for PropertyList {
    fn from(properties: Vec<Property>) -> Self {
        let mut list = Self::new();
        for property in properties {
            list.append(property);
        }

        list
    }
}

impl PropertyLoadSaver for PropertyList {
    fn load(&mut self, properties: Vec<Property>) -> Result<(), InternalError> {
        for property in properties {
            self.append(property);
        }

        Ok(())
    }

    fn save(&self) -> Result<Vec<Property>, InternalError> {
        Ok(self.0.clone())
    }
}

///
/// TESTS
///
