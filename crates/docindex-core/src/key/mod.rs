//! Module: key
//! Responsibility: hierarchical store keys (kind, id, namespace, parent chain).
//! Does not own: id allocation or persistence; those belong to the store.
//!
//! Invariants:
//! - A key is incomplete until its id is assigned.
//! - Ordering is total so keys can address ordered maps.


use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// KeyId
///
/// Identifier part of a key. `Incomplete` marks a key awaiting allocation.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum KeyId {
    #[default]
    Incomplete,
    Id(i64),
    Name(String),
}

impl Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "?"),
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

///
/// Key
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Key {
    pub namespace: String,
    pub parent: Option<Box<Self>>,
    pub kind: String,
    pub id: KeyId,
}

impl Key {
    /// Key addressed by a string name.
    #[must_use]
    pub fn name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: KeyId::Name(name.into()),
            ..Self::default()
        }
    }

    /// Key addressed by a numeric id.
    #[must_use]
    pub fn id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id: KeyId::Id(id),
            ..Self::default()
        }
    }

    /// Key whose id is still to be allocated.
    #[must_use]
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Nest this key under `parent`.
    #[must_use]
    pub fn with_parent(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Set `namespace` on this key and every ancestor.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.set_namespace(namespace);
        self
    }

    /// Set `namespace` on this key and every ancestor, in place.
    pub fn set_namespace(&mut self, namespace: &str) {
        let mut cursor = Some(self);
        while let Some(key) = cursor {
            namespace.clone_into(&mut key.namespace);
            cursor = key.parent.as_deref_mut();
        }
    }

    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self.id, KeyId::Incomplete)
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !self.is_incomplete()
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Iterate this key and then each ancestor, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |&key| key.parent())
    }

    /// Whether `ancestor` is this key or one of its ancestors.
    #[must_use]
    pub fn has_ancestor(&self, ancestor: &Self) -> bool {
        self.ancestors().any(|key| key == ancestor)
    }

    /// A key is usable for storage when it names a kind, every ancestor is
    /// complete and the whole chain shares one namespace.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.kind.is_empty() {
            return false;
        }

        self.ancestors().skip(1).all(|parent| {
            !parent.kind.is_empty() && parent.is_complete() && parent.namespace == self.namespace
        })
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}:", self.namespace)?;
        }

        let mut chain: Vec<&Self> = self.ancestors().collect();
        chain.reverse();

        for key in chain {
            write!(f, "/{},{}", key.kind, key.id)?;
        }

        Ok(())
    }
}
