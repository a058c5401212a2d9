//! Encode-side containers building a document value.

use serde_json::{Map, Value};

use crate::key::RawKey;
use crate::value::AnyValue;

/// Builder for one object, addressing fields by [`RawKey`].
///
/// Values enter through `Into<AnyValue>`, a closed conversion set, so there
/// is no runtime "unsupported type" failure path.
#[derive(Debug, Clone, Default)]
pub struct KeyedEncoder {
    map: Map<String, Value>,
}

impl KeyedEncoder {
    pub fn new() -> Self {
        KeyedEncoder::default()
    }

    /// Encodes a value of runtime-determined shape at `key`.
    pub fn encode_any(&mut self, key: impl Into<RawKey>, value: impl Into<AnyValue>) {
        self.map
            .insert(key.into().into_string(), value.into().to_json());
    }

    /// Like [`KeyedEncoder::encode_any`], but `None` writes nothing at all,
    /// leaving the key absent rather than null.
    pub fn encode_any_if_present(
        &mut self,
        key: impl Into<RawKey>,
        value: Option<impl Into<AnyValue>>,
    ) {
        if let Some(value) = value {
            self.encode_any(key, value);
        }
    }

    /// Inserts an already-built nested object.
    pub fn encode_keyed(&mut self, key: impl Into<RawKey>, nested: KeyedEncoder) {
        self.map.insert(key.into().into_string(), nested.into_json());
    }

    /// Inserts an already-built nested array.
    pub fn encode_seq(&mut self, key: impl Into<RawKey>, nested: SeqEncoder) {
        self.map.insert(key.into().into_string(), nested.into_json());
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.map)
    }
}

/// Builder for one array.
#[derive(Debug, Clone, Default)]
pub struct SeqEncoder {
    items: Vec<Value>,
}

impl SeqEncoder {
    pub fn new() -> Self {
        SeqEncoder::default()
    }

    /// Appends a value of runtime-determined shape.
    pub fn encode_any(&mut self, value: impl Into<AnyValue>) {
        self.items.push(value.into().to_json());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_json(self) -> Value {
        Value::Array(self.items)
    }
}
