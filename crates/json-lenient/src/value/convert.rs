//! Conversions between [`AnyValue`] and the underlying document model.

use serde_json::{Map, Number, Value};

use super::AnyValue;

/// Short name of a document value's shape, used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.as_i64().is_some() => "integer",
        Value::Number(_) => "floating-point number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl AnyValue {
    /// Builds a dynamic value from a document value.
    ///
    /// Numbers are probed as integers first and fall back to floating-point,
    /// so `1` becomes `Int(1)` while `1.0` stays `Double(1.0)`. Probing order
    /// is the contract, not numeric equality.
    pub fn from_json(value: &Value) -> AnyValue {
        match value {
            Value::Null => AnyValue::Null,
            Value::Bool(b) => AnyValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AnyValue::Int(i),
                // Out-of-range u64 magnitudes land here too, losing precision.
                None => AnyValue::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AnyValue::Str(s.clone()),
            Value::Array(items) => AnyValue::Array(items.iter().map(AnyValue::from_json).collect()),
            Value::Object(fields) => AnyValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), AnyValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Renders the dynamic value back into a document value.
    ///
    /// Non-finite doubles have no JSON representation and encode as null.
    pub fn to_json(&self) -> Value {
        match self {
            AnyValue::Null => Value::Null,
            AnyValue::Bool(b) => Value::Bool(*b),
            AnyValue::Int(n) => Value::Number(Number::from(*n)),
            AnyValue::Double(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            AnyValue::Str(s) => Value::String(s.clone()),
            AnyValue::Array(items) => Value::Array(items.iter().map(AnyValue::to_json).collect()),
            AnyValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        AnyValue::from_json(value)
    }
}

impl From<&AnyValue> for Value {
    fn from(value: &AnyValue) -> Self {
        value.to_json()
    }
}

impl From<AnyValue> for Value {
    fn from(value: AnyValue) -> Self {
        value.to_json()
    }
}
