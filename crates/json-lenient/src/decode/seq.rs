//! Positional view over one document array.

use serde_json::Value;

use super::{Decode, DecodeSession, KeyedDecoder, ValueDecoder};
use crate::error::DecodeError;
use crate::family::VariantFn;

/// Cursor over one array. Single-owner: decoding advances the cursor only on
/// success, so a failed element decode leaves it on the same element and
/// [`SeqDecoder::skip`] moves past it.
pub struct SeqDecoder<'a> {
    items: &'a [Value],
    session: &'a DecodeSession,
    index: usize,
}

impl<'a> SeqDecoder<'a> {
    pub(crate) fn new(items: &'a [Value], session: &'a DecodeSession) -> Self {
        SeqDecoder {
            items,
            session,
            index: 0,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    fn current(&self) -> Result<ValueDecoder<'a>, DecodeError> {
        match self.items.get(self.index) {
            Some(value) => Ok(ValueDecoder::new(value, self.session)),
            None => Err(DecodeError::EndOfSequence(self.index)),
        }
    }

    /// Decodes the current element, advancing past it on success.
    pub fn decode<T: Decode>(&mut self) -> Result<T, DecodeError> {
        let value = T::decode(self.current()?)?;
        self.index += 1;
        Ok(value)
    }

    /// Decodes the current element through an explicit decode function,
    /// advancing past it on success.
    pub fn decode_with<B>(&mut self, decode: VariantFn<B>) -> Result<B, DecodeError> {
        let value = decode(self.current()?)?;
        self.index += 1;
        Ok(value)
    }

    /// Read-only probe of the current element as a keyed container, without
    /// advancing the cursor. The same element can subsequently be decoded in
    /// full.
    pub fn peek_keyed(&self) -> Result<KeyedDecoder<'a>, DecodeError> {
        self.current()?.keyed()
    }

    /// Advances past the current element unconditionally. Used to keep the
    /// cursor in sync after an element that could not be decoded.
    pub fn skip(&mut self) {
        if self.index < self.items.len() {
            self.index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_decode_leaves_the_cursor_in_place() {
        let session = DecodeSession::default();
        let doc = json!([1, "two", 3]);
        let mut seq = ValueDecoder::new(&doc, &session).seq().unwrap();

        assert_eq!(seq.decode::<i64>().unwrap(), 1);
        assert!(seq.decode::<i64>().is_err());
        assert_eq!(seq.index(), 1);
        seq.skip();
        assert_eq!(seq.decode::<i64>().unwrap(), 3);
        assert!(seq.is_at_end());
    }

    #[test]
    fn peek_does_not_advance() {
        let session = DecodeSession::default();
        let doc = json!([{ "type": "beer" }]);
        let mut seq = ValueDecoder::new(&doc, &session).seq().unwrap();

        let probe = seq.peek_keyed().unwrap();
        assert_eq!(probe.decode::<String>("type").unwrap(), "beer");
        assert_eq!(seq.index(), 0);

        let full: std::collections::BTreeMap<String, String> = seq.decode().unwrap();
        assert_eq!(full["type"], "beer");
        assert!(seq.is_at_end());
    }

    #[test]
    fn reading_past_the_end_is_an_error() {
        let session = DecodeSession::default();
        let doc = json!([]);
        let mut seq = ValueDecoder::new(&doc, &session).seq().unwrap();
        assert!(matches!(
            seq.decode::<i64>(),
            Err(DecodeError::EndOfSequence(0))
        ));
    }
}
