//! Decode protocol: session configuration, entry points, and the per-value
//! handle the container views hand out.

mod keyed;
mod seq;

pub use keyed::KeyedDecoder;
pub use seq::SeqDecoder;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::DecodeError;
use crate::strategy::InvalidElementStrategy;
use crate::value::{json_kind, AnyValue};

/// A type decodable from one document value.
pub trait Decode: Sized {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError>;
}

/// Session-scoped decode configuration.
///
/// Owned by one [`Decoder`] and threaded by shared reference through every
/// nested container view; read-only for the duration of a decode call, so
/// concurrent decoders never observe each other's settings.
#[derive(Clone, Default)]
pub struct DecodeSession {
    /// Default recovery policy for collection decodes that pass no explicit
    /// strategy. Narrowed to the element type at use time.
    pub invalid_element_strategy: Option<InvalidElementStrategy<AnyValue>>,
}

impl DecodeSession {
    /// Three-tier strategy resolution: explicit argument, then the session
    /// default, then `Fail`. Evaluated once per field-decode call.
    pub(crate) fn element_strategy<T: Decode + 'static>(
        &self,
        explicit: Option<InvalidElementStrategy<T>>,
    ) -> InvalidElementStrategy<T> {
        match explicit {
            Some(strategy) => strategy,
            None => match &self.invalid_element_strategy {
                Some(default) => default.narrow(),
                None => InvalidElementStrategy::Fail,
            },
        }
    }
}

/// Top-level decode entry point carrying a [`DecodeSession`].
#[derive(Clone, Default)]
pub struct Decoder {
    session: DecodeSession,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder::default()
    }

    /// Registers the session-default invalid-element strategy.
    pub fn with_invalid_element_strategy(
        mut self,
        strategy: InvalidElementStrategy<AnyValue>,
    ) -> Self {
        self.session.invalid_element_strategy = Some(strategy);
        self
    }

    pub fn session(&self) -> &DecodeSession {
        &self.session
    }

    /// Decodes `T` from JSON text.
    pub fn decode_str<T: Decode>(&self, json: &str) -> Result<T, DecodeError> {
        let value: Value = serde_json::from_str(json)?;
        self.decode_value(&value)
    }

    /// Decodes `T` from JSON bytes.
    pub fn decode_slice<T: Decode>(&self, json: &[u8]) -> Result<T, DecodeError> {
        let value: Value = serde_json::from_slice(json)?;
        self.decode_value(&value)
    }

    /// Decodes `T` from an already-parsed document value.
    pub fn decode_value<T: Decode>(&self, value: &Value) -> Result<T, DecodeError> {
        T::decode(ValueDecoder::new(value, &self.session))
    }
}

/// Decodes `T` from JSON text with a default session.
pub fn from_str<T: Decode>(json: &str) -> Result<T, DecodeError> {
    Decoder::new().decode_str(json)
}

/// Decodes `T` from JSON bytes with a default session.
pub fn from_slice<T: Decode>(json: &[u8]) -> Result<T, DecodeError> {
    Decoder::new().decode_slice(json)
}

/// Decodes `T` from a document value with a default session.
pub fn from_value<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    Decoder::new().decode_value(value)
}

/// Handle on one document value plus the session it is decoded under.
#[derive(Clone, Copy)]
pub struct ValueDecoder<'a> {
    value: &'a Value,
    session: &'a DecodeSession,
}

impl<'a> ValueDecoder<'a> {
    pub fn new(value: &'a Value, session: &'a DecodeSession) -> Self {
        ValueDecoder { value, session }
    }

    /// The underlying document value.
    pub fn json(&self) -> &'a Value {
        self.value
    }

    pub fn session(&self) -> &'a DecodeSession {
        self.session
    }

    /// Opens the value as a keyed container.
    pub fn keyed(self) -> Result<KeyedDecoder<'a>, DecodeError> {
        match self.value {
            Value::Object(map) => Ok(KeyedDecoder::new(map, self.session)),
            other => Err(self.mismatch_for("object", other)),
        }
    }

    /// Opens the value as a positional container.
    pub fn seq(self) -> Result<SeqDecoder<'a>, DecodeError> {
        match self.value {
            Value::Array(items) => Ok(SeqDecoder::new(items, self.session)),
            other => Err(self.mismatch_for("array", other)),
        }
    }

    /// Wraps the value as a dynamic [`AnyValue`].
    pub fn any(&self) -> AnyValue {
        AnyValue::from_json(self.value)
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> DecodeError {
        self.mismatch_for(expected, self.value)
    }

    fn mismatch_for(&self, expected: &'static str, found: &Value) -> DecodeError {
        DecodeError::mismatch(expected, json_kind(found))
    }
}

impl Decode for AnyValue {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        Ok(d.any())
    }
}

impl Decode for bool {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        match d.json() {
            Value::Bool(b) => Ok(*b),
            _ => Err(d.mismatch("bool")),
        }
    }
}

impl Decode for i64 {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        match d.json() {
            Value::Number(n) => n.as_i64().ok_or_else(|| d.mismatch("integer")),
            _ => Err(d.mismatch("integer")),
        }
    }
}

/// Schema-driven numeric decode: unlike the dynamic probing path, a typed
/// `f64` target accepts integer literals.
impl Decode for f64 {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        match d.json() {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| d.mismatch("floating-point number")),
            _ => Err(d.mismatch("floating-point number")),
        }
    }
}

impl Decode for String {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        match d.json() {
            Value::String(s) => Ok(s.clone()),
            _ => Err(d.mismatch("string")),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        match d.json() {
            Value::Null => Ok(None),
            _ => T::decode(d).map(Some),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        let mut seq = d.seq()?;
        let mut items = Vec::with_capacity(seq.len());
        while !seq.is_at_end() {
            items.push(seq.decode()?);
        }
        Ok(items)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
        let keyed = d.keyed()?;
        let mut fields = BTreeMap::new();
        for key in keyed.all_keys() {
            let value = keyed.decode(key.clone())?;
            fields.insert(key.into_string(), value);
        }
        Ok(fields)
    }
}
