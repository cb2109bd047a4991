pub mod entity;
pub mod tx;

pub use entity::{Account, Note, T, User};
pub use tx::RecordingTx;

use crate::{error::InternalError, value::Value};

///
/// FromValue
///
/// Decode side of the test entities' property codec.
///

pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, InternalError>;
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, InternalError> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| InternalError::serialize_corruption(format!("expected text: {value:?}")))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, InternalError> {
        value
            .as_int()
            .ok_or_else(|| InternalError::serialize_corruption(format!("expected int: {value:?}")))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, InternalError> {
        if value.is_null() {
            return Ok(None);
        }

        T::from_value(value).map(Some)
    }
}
