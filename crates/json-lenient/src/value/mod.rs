//! Dynamic value representation for fields whose shape is unknown until
//! runtime.

mod cast;
mod convert;

pub use cast::FromAny;
pub(crate) use convert::json_kind;

use std::collections::BTreeMap;

/// An arbitrary decoded value.
///
/// The seven variants are exhaustive for the JSON document model. Values are
/// finite and acyclic: they are only ever built by decoding a finite document
/// or by wrapping a finite in-memory value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Array(Vec<AnyValue>),
    Object(BTreeMap<String, AnyValue>),
}

impl AnyValue {
    /// Short name of the variant's natural type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyValue::Null => "null",
            AnyValue::Bool(_) => "bool",
            AnyValue::Int(_) => "integer",
            AnyValue::Double(_) => "floating-point number",
            AnyValue::Str(_) => "string",
            AnyValue::Array(_) => "array",
            AnyValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            AnyValue::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, AnyValue>> {
        match self {
            AnyValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field lookup on `Object`, `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.as_object().and_then(|fields| fields.get(key))
    }
}

impl From<bool> for AnyValue {
    fn from(b: bool) -> Self {
        AnyValue::Bool(b)
    }
}

impl From<i64> for AnyValue {
    fn from(n: i64) -> Self {
        AnyValue::Int(n)
    }
}

impl From<i32> for AnyValue {
    fn from(n: i32) -> Self {
        AnyValue::Int(n.into())
    }
}

impl From<u32> for AnyValue {
    fn from(n: u32) -> Self {
        AnyValue::Int(n.into())
    }
}

impl From<f64> for AnyValue {
    fn from(n: f64) -> Self {
        AnyValue::Double(n)
    }
}

impl From<&str> for AnyValue {
    fn from(s: &str) -> Self {
        AnyValue::Str(s.to_owned())
    }
}

impl From<String> for AnyValue {
    fn from(s: String) -> Self {
        AnyValue::Str(s)
    }
}

impl<T: Into<AnyValue>> From<Vec<T>> for AnyValue {
    fn from(items: Vec<T>) -> Self {
        AnyValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AnyValue>> From<BTreeMap<String, T>> for AnyValue {
    fn from(fields: BTreeMap<String, T>) -> Self {
        AnyValue::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<AnyValue>> From<Option<T>> for AnyValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => AnyValue::Null,
        }
    }
}
