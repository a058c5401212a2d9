//! Per-element recovery policy for collection decoding.

use std::fmt;
use std::sync::Arc;

use crate::decode::{Decode, DecodeSession, ValueDecoder};
use crate::error::DecodeError;
use crate::value::AnyValue;

/// Upper bound on `Custom` strategy chaining for a single element.
///
/// A custom strategy that keeps producing further custom strategies denies
/// progress; past this bound the element decode fails with
/// [`DecodeError::StrategyUnresolved`].
pub const MAX_CUSTOM_STEPS: usize = 32;

/// Callback resolving a concrete decode error to a follow-up strategy.
pub type CustomFn<T> = Arc<dyn Fn(&DecodeError) -> InvalidElementStrategy<T> + Send + Sync>;

/// What to do when one element of a collection fails to decode.
///
/// A strategy value is immutable and stateless; the same value is applied to
/// every element of one collection-decode call.
pub enum InvalidElementStrategy<T> {
    /// Drop the malformed element.
    Remove,
    /// Re-raise the element's decode error, aborting the whole collection.
    Fail,
    /// Substitute the carried value for the malformed element.
    Fallback(T),
    /// Ask a callback, which inspects the concrete error and produces the
    /// strategy to apply to the same element.
    Custom(CustomFn<T>),
}

impl<T> InvalidElementStrategy<T> {
    /// Convenience constructor for [`InvalidElementStrategy::Custom`].
    pub fn custom(
        f: impl Fn(&DecodeError) -> InvalidElementStrategy<T> + Send + Sync + 'static,
    ) -> Self {
        InvalidElementStrategy::Custom(Arc::new(f))
    }

    /// Resolves the outcome for one failed element.
    ///
    /// `Ok(None)` drops the element, `Ok(Some(v))` substitutes `v`, `Err`
    /// aborts the collection. `Custom` chains are walked iteratively up to
    /// [`MAX_CUSTOM_STEPS`]; the element is never re-read.
    pub(crate) fn resolve(&self, err: DecodeError) -> Result<Option<T>, DecodeError>
    where
        T: Clone,
    {
        let mut current = self.clone();
        for _ in 0..MAX_CUSTOM_STEPS {
            match current {
                InvalidElementStrategy::Remove => return Ok(None),
                InvalidElementStrategy::Fail => return Err(err),
                InvalidElementStrategy::Fallback(value) => return Ok(Some(value)),
                InvalidElementStrategy::Custom(f) => current = f(&err),
            }
        }
        Err(DecodeError::StrategyUnresolved {
            limit: MAX_CUSTOM_STEPS,
        })
    }
}

impl InvalidElementStrategy<AnyValue> {
    /// Narrows a session-default strategy to a concrete element type.
    ///
    /// A `Fallback` payload is reinterpreted by decoding its document form as
    /// `T`; when that fails the narrowed strategy degrades to `Fail`.
    pub fn narrow<T: Decode + 'static>(&self) -> InvalidElementStrategy<T> {
        match self {
            InvalidElementStrategy::Remove => InvalidElementStrategy::Remove,
            InvalidElementStrategy::Fail => InvalidElementStrategy::Fail,
            InvalidElementStrategy::Fallback(value) => {
                let json = value.to_json();
                let session = DecodeSession::default();
                match T::decode(ValueDecoder::new(&json, &session)) {
                    Ok(value) => InvalidElementStrategy::Fallback(value),
                    Err(_) => InvalidElementStrategy::Fail,
                }
            }
            InvalidElementStrategy::Custom(f) => {
                let f = Arc::clone(f);
                InvalidElementStrategy::Custom(Arc::new(move |err| f(err).narrow()))
            }
        }
    }
}

impl<T: Clone> Clone for InvalidElementStrategy<T> {
    fn clone(&self) -> Self {
        match self {
            InvalidElementStrategy::Remove => InvalidElementStrategy::Remove,
            InvalidElementStrategy::Fail => InvalidElementStrategy::Fail,
            InvalidElementStrategy::Fallback(value) => {
                InvalidElementStrategy::Fallback(value.clone())
            }
            InvalidElementStrategy::Custom(f) => InvalidElementStrategy::Custom(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for InvalidElementStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidElementStrategy::Remove => f.write_str("Remove"),
            InvalidElementStrategy::Fail => f.write_str("Fail"),
            InvalidElementStrategy::Fallback(value) => {
                f.debug_tuple("Fallback").field(value).finish()
            }
            InvalidElementStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T> fmt::Display for InvalidElementStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidElementStrategy::Remove => f.write_str("remove"),
            InvalidElementStrategy::Fail => f.write_str("fail"),
            InvalidElementStrategy::Fallback(_) => f.write_str("fallback"),
            InvalidElementStrategy::Custom(_) => f.write_str("custom"),
        }
    }
}
