use crate::{
    error::InternalError,
    key::{Key, KeyId},
    model::index::Index,
    traits::FieldValues,
    value::Value,
};
use docindex_utils::hash::{Xxh3, hasher};

const VERSION: u8 = 1;

// separates tuple members and list items
const SEPARATOR: u8 = 0xFF;

fn feed_u8(h: &mut Xxh3, x: u8) {
    h.update(&[x]);
}
fn feed_i64(h: &mut Xxh3, x: i64) {
    h.update(&x.to_be_bytes());
}
fn feed_u64(h: &mut Xxh3, x: u64) {
    h.update(&x.to_be_bytes());
}
fn feed_len(h: &mut Xxh3, len: usize) {
    feed_u64(h, u64::try_from(len).unwrap_or(u64::MAX));
}
fn feed_framed(h: &mut Xxh3, b: &[u8]) {
    feed_len(h, b.len());
    h.update(b);
}

fn write_key(key: &Key, h: &mut Xxh3) {
    feed_framed(h, key.namespace.as_bytes());

    let mut chain: Vec<&Key> = key.ancestors().collect();
    chain.reverse();
    feed_len(h, chain.len());

    for link in chain {
        feed_framed(h, link.kind.as_bytes());
        match &link.id {
            KeyId::Incomplete => feed_u8(h, 0x00),
            KeyId::Id(id) => {
                feed_u8(h, 0x01);
                feed_i64(h, *id);
            }
            KeyId::Name(name) => {
                feed_u8(h, 0x02);
                feed_framed(h, name.as_bytes());
            }
        }
    }
}

#[allow(clippy::float_cmp)]
pub(crate) fn write_to_hasher(value: &Value, h: &mut Xxh3) {
    feed_u8(h, value.canonical_tag().to_u8());

    match value {
        Value::Null => {}
        Value::Bool(b) => feed_u8(h, u8::from(*b)),
        Value::Int(i) | Value::Timestamp(i) => feed_i64(h, *i),
        Value::Uint(u) => feed_u64(h, *u),
        Value::Float64(f) => {
            // -0.0 and 0.0 compare equal, so they must hash equal
            let bits = if *f == 0.0 { 0 } else { f.to_bits() };
            feed_u64(h, bits);
        }
        Value::Text(s) => feed_framed(h, s.as_bytes()),
        Value::Blob(b) => feed_framed(h, b),
        Value::Key(key) => write_key(key, h),
        Value::List(xs) => {
            feed_len(h, xs.len());
            for x in xs {
                feed_u8(h, SEPARATOR);
                write_to_hasher(x, h);
            }
        }
    }
}

/// Stable hash of a single value.
#[must_use]
pub fn hash_value(value: &Value) -> u64 {
    let mut h = hasher();
    feed_u8(&mut h, VERSION);
    write_to_hasher(value, &mut h);

    h.digest()
}

/// Hash the ordered tuple of `entity`'s values for the fields of `index`.
///
/// Null participates, so two entities that both lack a value share a
/// fingerprint.
pub fn fingerprint<E>(index: &Index, entity: &E) -> Result<u64, InternalError>
where
    E: FieldValues + ?Sized,
{
    let mut h = hasher();
    feed_u8(&mut h, VERSION);
    feed_len(&mut h, index.fields.len());

    for field in &index.fields {
        let value = entity.get_value(field.name).ok_or_else(|| {
            InternalError::index_invariant(format!(
                "index '{}' field '{}' (position {}) is not readable",
                index.name, field.name, field.position
            ))
        })?;

        feed_u8(&mut h, SEPARATOR);
        write_to_hasher(&value, &mut h);
    }

    Ok(h.digest())
}

///
/// TESTS
///
