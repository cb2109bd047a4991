use crate::{
    db::property::Property,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// RawRowError
/// Construction / storage-boundary errors.
///

#[derive(Debug, ThisError)]
pub(crate) enum RawRowError {
    #[error("row exceeds max size: {len} bytes (limit {MAX_ROW_BYTES})")]
    TooLarge { len: usize },
}

impl From<RawRowError> for InternalError {
    fn from(err: RawRowError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Store, err.to_string())
    }
}

/// Max serialized bytes for a single row.
pub(crate) const MAX_ROW_BYTES: usize = 1024 * 1024;

///
/// RawRow
/// CBOR-encoded property list as held by the in-memory store.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRow(Vec<u8>);

impl RawRow {
    pub(crate) fn try_new(bytes: Vec<u8>) -> Result<Self, RawRowError> {
        if bytes.len() > MAX_ROW_BYTES {
            return Err(RawRowError::TooLarge { len: bytes.len() });
        }

        Ok(Self(bytes))
    }

    /// Encode a property list.
    pub fn encode(properties: &[Property]) -> Result<Self, InternalError> {
        let bytes = serde_cbor::to_vec(&properties)
            .map_err(|err| InternalError::serialize_internal(format!("row encode: {err}")))?;

        Ok(Self::try_new(bytes)?)
    }

    /// Decode back into a property list.
    pub fn decode(&self) -> Result<Vec<Property>, InternalError> {
        serde_cbor::from_slice(&self.0)
            .map_err(|err| InternalError::serialize_corruption(format!("row decode: {err}")))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
