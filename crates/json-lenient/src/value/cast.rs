//! Casts from [`AnyValue`] to concrete application types.

use std::collections::BTreeMap;

use super::AnyValue;
use crate::error::DecodeError;

/// Conversion from a fully resolved dynamic value to a concrete type.
///
/// Casts are strict pattern matches on the variant's natural type: an `Int`
/// does not cast to `f64`, and nested values are individually checked, so a
/// heterogeneous object fails a `BTreeMap<String, String>` cast.
pub trait FromAny: Sized {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError>;
}

impl FromAny for AnyValue {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        Ok(value)
    }
}

impl FromAny for bool {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Bool(b) => Ok(b),
            other => Err(DecodeError::mismatch("bool", other.kind())),
        }
    }
}

impl FromAny for i64 {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Int(n) => Ok(n),
            other => Err(DecodeError::mismatch("integer", other.kind())),
        }
    }
}

impl FromAny for f64 {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Double(n) => Ok(n),
            other => Err(DecodeError::mismatch("floating-point number", other.kind())),
        }
    }
}

impl FromAny for String {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Str(s) => Ok(s),
            other => Err(DecodeError::mismatch("string", other.kind())),
        }
    }
}

impl<T: FromAny> FromAny for Option<T> {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Null => Ok(None),
            other => T::from_any(other).map(Some),
        }
    }
}

impl<T: FromAny> FromAny for Vec<T> {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Array(items) => items.into_iter().map(T::from_any).collect(),
            other => Err(DecodeError::mismatch("array", other.kind())),
        }
    }
}

impl<T: FromAny> FromAny for BTreeMap<String, T> {
    fn from_any(value: AnyValue) -> Result<Self, DecodeError> {
        match value {
            AnyValue::Object(fields) => fields
                .into_iter()
                .map(|(k, v)| T::from_any(v).map(|v| (k, v)))
                .collect(),
            other => Err(DecodeError::mismatch("object", other.kind())),
        }
    }
}
