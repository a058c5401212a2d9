//! Lenient JSON decoding and encoding layered on a strict, typed model.
//!
//! Three capabilities the strict model lacks:
//! - [`AnyValue`]: decoding and encoding fields whose shape is unknown until
//!   runtime, with strict [`FromAny`] casts back to concrete types;
//! - [`InvalidElementStrategy`]: per-element recovery when some elements of
//!   a homogeneous collection are malformed;
//! - [`TypeFamily`]: decoding heterogeneous lists whose concrete element
//!   type is selected by a discriminator field.
//!
//! The base protocol is realized as borrowing container views over an
//! already-parsed `serde_json::Value`: [`KeyedDecoder`] for objects,
//! [`SeqDecoder`] for arrays, with [`KeyedEncoder`] / [`SeqEncoder`] on the
//! encode side. A [`Decoder`] owns the session configuration (currently the
//! default invalid-element strategy) and threads it through every view.

mod decode;
mod encode;
mod error;
mod family;
mod key;
mod strategy;
mod value;

pub use decode::{
    from_slice, from_str, from_value, Decode, DecodeSession, Decoder, KeyedDecoder, SeqDecoder,
    ValueDecoder,
};
pub use encode::{KeyedEncoder, SeqEncoder};
pub use error::DecodeError;
pub use family::{DiscriminatorKey, TypeFamily, VariantFn};
pub use key::RawKey;
pub use strategy::{CustomFn, InvalidElementStrategy, MAX_CUSTOM_STEPS};
pub use value::{AnyValue, FromAny};

#[cfg(test)]
mod tests {
    use super::*;

    struct Event {
        name: String,
        payload: AnyValue,
        tags: Vec<i64>,
    }

    impl Decode for Event {
        fn decode(d: ValueDecoder<'_>) -> Result<Self, DecodeError> {
            let c = d.keyed()?;
            Ok(Event {
                name: c.decode("name")?,
                payload: c.decode_any("payload")?,
                tags: c.decode_array("tags", Some(InvalidElementStrategy::Remove))?,
            })
        }
    }

    #[test]
    fn end_to_end_smoke() {
        let event: Event = from_str(
            r#"{
                "name": "deploy",
                "payload": { "region": "eu", "replicas": 3 },
                "tags": [1, "two", 3]
            }"#,
        )
        .unwrap();

        assert_eq!(event.name, "deploy");
        assert_eq!(
            event.payload.get("region").and_then(AnyValue::as_str),
            Some("eu")
        );
        assert_eq!(event.payload.get("replicas"), Some(&AnyValue::Int(3)));
        assert_eq!(event.tags, vec![1, 3]);
    }

    #[test]
    fn encode_then_decode_smoke() {
        let mut encoder = KeyedEncoder::new();
        encoder.encode_any("flag", true);
        encoder.encode_any("count", 2i64);
        let doc = encoder.into_json();

        let any: AnyValue = from_value(&doc).unwrap();
        assert_eq!(any.get("flag"), Some(&AnyValue::Bool(true)));
        assert_eq!(any.get("count"), Some(&AnyValue::Int(2)));
    }
}
