///
/// FieldModel
/// Declared field metadata: the stored property name plus its raw annotations.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    /// Struct-tag style annotations, e.g. `index:"email,unique"`.
    pub tag: &'static str,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self { name, tag }
    }

    /// Field without annotations.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self { name, tag: "" }
    }
}

///
/// FieldRef
/// Field reference resolved at tree-build time.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldRef {
    pub name: &'static str,
    /// Declaration position within `EntitySchema::FIELDS`.
    pub position: usize,
}
