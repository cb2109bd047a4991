//! Field annotation parser.
//!
//! Annotations use struct-tag syntax: space separated `key:"value"` pairs where
//! the value is a comma list whose first item is the name and the rest are
//! options, e.g. `index:"email,unique" unique:""`.

use thiserror::Error as ThisError;

///
/// TagError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TagError {
    #[error("bad syntax for struct tag pair at byte {offset}")]
    Syntax { offset: usize },

    #[error("bad syntax for struct tag key at byte {offset}")]
    KeySyntax { offset: usize },

    #[error("bad syntax for struct tag value at byte {offset}")]
    ValueSyntax { offset: usize },
}

///
/// Tag
/// One parsed `key:"name,opt,..."` pair.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

impl Tag {
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

///
/// Tags
/// Parsed annotation set of one field, in declaration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Parse a raw annotation string.
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        let bytes = raw.as_bytes();
        let mut tags = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            // skip leading spaces
            while pos < bytes.len() && bytes[pos] == b' ' {
                pos += 1;
            }
            if pos == bytes.len() {
                break;
            }

            // key runs until a separator or control byte
            let key_start = pos;
            while pos < bytes.len()
                && bytes[pos] > b' '
                && bytes[pos] != b':'
                && bytes[pos] != b'"'
                && bytes[pos] != 0x7f
            {
                pos += 1;
            }
            if pos == key_start {
                return Err(TagError::KeySyntax { offset: pos });
            }
            if pos + 1 >= bytes.len() || bytes[pos] != b':' {
                return Err(TagError::Syntax { offset: pos });
            }
            if bytes[pos + 1] != b'"' {
                return Err(TagError::ValueSyntax { offset: pos + 1 });
            }
            let key = &raw[key_start..pos];

            // quoted value, honouring backslash escapes
            let value_start = pos + 1;
            let mut end = value_start + 1;
            while end < bytes.len() && bytes[end] != b'"' {
                if bytes[end] == b'\\' {
                    end += 1;
                }
                end += 1;
            }
            if end >= bytes.len() {
                return Err(TagError::ValueSyntax {
                    offset: value_start,
                });
            }

            let value = unquote(&raw[value_start + 1..end])
                .ok_or(TagError::ValueSyntax {
                    offset: value_start,
                })?;
            pos = end + 1;

            let mut parts = value.split(',').map(str::to_string);
            let name = parts.next().unwrap_or_default();

            tags.push(Tag {
                key: key.to_string(),
                name,
                options: parts.collect(),
            });
        }

        Ok(Self(tags))
    }

    /// First tag carrying `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.iter().find(|tag| tag.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

// Resolve the escapes allowed inside a quoted annotation value.
fn unquote(inner: &str) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            _ => return None,
        }
    }

    Some(out)
}

///
/// TESTS
///
