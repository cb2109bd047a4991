use crate::model::field::FieldRef;
use std::fmt::{self, Display};

///
/// Index
/// Named index over an ordered, non-empty list of fields.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index {
    pub name: String,
    pub fields: Vec<FieldRef>,
    pub unique: bool,
}

impl Index {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unique: false,
        }
    }

    /// Field names in index order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.field_names().collect::<Vec<_>>().join(", ");

        if self.unique {
            write!(f, "UNIQUE {}({})", self.name, fields)
        } else {
            write!(f, "{}({})", self.name, fields)
        }
    }
}
