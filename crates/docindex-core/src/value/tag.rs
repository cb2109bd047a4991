use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by fingerprint hashing.
///
/// IMPORTANT:
/// Tag values feed persisted index keys and must never be renumbered.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Int = 3,
    Uint = 4,
    Float64 = 5,
    Text = 6,
    Blob = 7,
    Timestamp = 8,
    Key = 9,
    List = 10,
}

impl ValueTag {
    /// Stable hash byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Uint => "Uint",
            Self::Float64 => "Float64",
            Self::Text => "Text",
            Self::Blob => "Blob",
            Self::Timestamp => "Timestamp",
            Self::Key => "Key",
            Self::List => "List",
        }
    }
}

/// Stable canonical variant tag used by hash/fingerprint encodings.
#[must_use]
pub(crate) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) => ValueTag::Int,
        Value::Uint(_) => ValueTag::Uint,
        Value::Float64(_) => ValueTag::Float64,
        Value::Text(_) => ValueTag::Text,
        Value::Blob(_) => ValueTag::Blob,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::Key(_) => ValueTag::Key,
        Value::List(_) => ValueTag::List,
    }
}
