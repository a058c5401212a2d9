//! Keyed view over one document object, plus the extension surface for
//! dynamic values, recoverable collections, and type families.

use serde_json::{Map, Value};

use super::{Decode, DecodeSession, SeqDecoder, ValueDecoder};
use crate::error::DecodeError;
use crate::family::TypeFamily;
use crate::key::RawKey;
use crate::strategy::InvalidElementStrategy;
use crate::value::FromAny;

/// View over one object, addressing fields by [`RawKey`].
#[derive(Clone, Copy)]
pub struct KeyedDecoder<'a> {
    map: &'a Map<String, Value>,
    session: &'a DecodeSession,
}

impl<'a> KeyedDecoder<'a> {
    pub(crate) fn new(map: &'a Map<String, Value>, session: &'a DecodeSession) -> Self {
        KeyedDecoder { map, session }
    }

    pub fn contains(&self, key: impl Into<RawKey>) -> bool {
        self.map.contains_key(key.into().as_str())
    }

    /// All field keys present, in document order.
    pub fn all_keys(&self) -> Vec<RawKey> {
        self.map.keys().map(RawKey::new).collect()
    }

    fn entry(&self, key: &RawKey) -> Result<ValueDecoder<'a>, DecodeError> {
        match self.map.get(key.as_str()) {
            Some(value) => Ok(ValueDecoder::new(value, self.session)),
            None => Err(DecodeError::KeyNotFound(key.as_str().to_owned())),
        }
    }

    /// Typed decode of one field.
    pub fn decode<T: Decode>(&self, key: impl Into<RawKey>) -> Result<T, DecodeError> {
        let key = key.into();
        T::decode(self.entry(&key)?)
    }

    /// Typed decode of one field; an absent key yields `None` with no side
    /// effect, while any other error propagates unchanged.
    pub fn decode_if_present<T: Decode>(
        &self,
        key: impl Into<RawKey>,
    ) -> Result<Option<T>, DecodeError> {
        let key = key.into();
        if !self.map.contains_key(key.as_str()) {
            return Ok(None);
        }
        self.decode(key).map(Some)
    }

    /// Decodes one field as a dynamic value, then casts it to `T`.
    pub fn decode_any<T: FromAny>(&self, key: impl Into<RawKey>) -> Result<T, DecodeError> {
        let key = key.into();
        T::from_any(self.entry(&key)?.any())
    }

    pub fn decode_any_if_present<T: FromAny>(
        &self,
        key: impl Into<RawKey>,
    ) -> Result<Option<T>, DecodeError> {
        let key = key.into();
        if !self.map.contains_key(key.as_str()) {
            return Ok(None);
        }
        self.decode_any(key).map(Some)
    }

    /// Decodes one field as a homogeneous array of `T`, recovering per
    /// element with the resolved strategy instead of failing the whole field
    /// on the first bad element.
    ///
    /// Strategy resolution: the explicit `strategy` argument, then the
    /// session default narrowed to `T`, then `Fail`. Surviving elements keep
    /// their input order.
    pub fn decode_array<T>(
        &self,
        key: impl Into<RawKey>,
        strategy: Option<InvalidElementStrategy<T>>,
    ) -> Result<Vec<T>, DecodeError>
    where
        T: Decode + Clone + 'static,
    {
        let mut seq = self.nested_seq(key)?;
        let strategy = self.session.element_strategy(strategy);
        let mut items = Vec::with_capacity(seq.len());
        while !seq.is_at_end() {
            match seq.decode::<T>() {
                Ok(value) => items.push(value),
                Err(err) => {
                    // A failed decode left the cursor on the malformed
                    // element; move past it before resolving the outcome.
                    seq.skip();
                    if let Some(value) = strategy.resolve(err)? {
                        items.push(value);
                    }
                }
            }
        }
        Ok(items)
    }

    pub fn decode_array_if_present<T>(
        &self,
        key: impl Into<RawKey>,
        strategy: Option<InvalidElementStrategy<T>>,
    ) -> Result<Option<Vec<T>>, DecodeError>
    where
        T: Decode + Clone + 'static,
    {
        let key = key.into();
        if !self.map.contains_key(key.as_str()) {
            return Ok(None);
        }
        self.decode_array(key, strategy).map(Some)
    }

    /// Decodes one field as a mapping from field name to `T`, recovering per
    /// entry with the resolved strategy. Keyed input needs no cursor motion,
    /// so recovery only decides whether the entry is kept.
    pub fn decode_dictionary<T>(
        &self,
        key: impl Into<RawKey>,
        strategy: Option<InvalidElementStrategy<T>>,
    ) -> Result<std::collections::BTreeMap<String, T>, DecodeError>
    where
        T: Decode + Clone + 'static,
    {
        let nested = self.nested_keyed(key)?;
        let strategy = self.session.element_strategy(strategy);
        let mut fields = std::collections::BTreeMap::new();
        for field in nested.all_keys() {
            match nested.decode::<T>(field.clone()) {
                Ok(value) => {
                    fields.insert(field.into_string(), value);
                }
                Err(err) => {
                    if let Some(value) = strategy.resolve(err)? {
                        fields.insert(field.into_string(), value);
                    }
                }
            }
        }
        Ok(fields)
    }

    pub fn decode_dictionary_if_present<T>(
        &self,
        key: impl Into<RawKey>,
        strategy: Option<InvalidElementStrategy<T>>,
    ) -> Result<Option<std::collections::BTreeMap<String, T>>, DecodeError>
    where
        T: Decode + Clone + 'static,
    {
        let key = key.into();
        if !self.map.contains_key(key.as_str()) {
            return Ok(None);
        }
        self.decode_dictionary(key, strategy).map(Some)
    }

    /// Decodes one field holding an array of polymorphic elements.
    ///
    /// Each element is probed for the family's discriminator field without
    /// advancing the cursor, the registered decode function is resolved, and
    /// the same element is then decoded in full. Any element failure aborts
    /// the whole family decode; no per-element recovery is composed here.
    pub fn decode_family<B>(
        &self,
        key: impl Into<RawKey>,
        family: &TypeFamily<B>,
    ) -> Result<Vec<B>, DecodeError> {
        let mut seq = self.nested_seq(key)?;
        let discriminator = family.discriminator().as_str();
        let mut items = Vec::with_capacity(seq.len());
        while !seq.is_at_end() {
            let tag: String = seq.peek_keyed()?.decode(discriminator)?;
            let decode =
                family
                    .resolve(&tag)
                    .ok_or_else(|| DecodeError::UnknownDiscriminator {
                        key: discriminator,
                        value: tag,
                    })?;
            items.push(seq.decode_with(decode)?);
        }
        Ok(items)
    }

    /// Opens a field as a nested keyed container.
    pub fn nested_keyed(&self, key: impl Into<RawKey>) -> Result<KeyedDecoder<'a>, DecodeError> {
        let key = key.into();
        self.entry(&key)?.keyed()
    }

    /// Opens a field as a nested positional container.
    pub fn nested_seq(&self, key: impl Into<RawKey>) -> Result<SeqDecoder<'a>, DecodeError> {
        let key = key.into();
        self.entry(&key)?.seq()
    }
}
