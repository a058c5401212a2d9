//! Decode error type shared by the whole crate.

use thiserror::Error;

/// Errors produced while decoding a document or a value inside one.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value at the current position has a different shape than the
    /// requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// A required field is absent from a keyed container.
    #[error("key `{0}` not found")]
    KeyNotFound(String),

    /// A positional read past the end of a sequence container.
    #[error("unexpected end of sequence at index {0}")]
    EndOfSequence(usize),

    /// A discriminator value with no registered concrete type.
    #[error("unknown discriminator value `{value}` for `{key}`")]
    UnknownDiscriminator { key: &'static str, value: String },

    /// A chain of `Custom` invalid-element strategies that never settled on
    /// remove, fail, or fallback.
    #[error("custom invalid-element strategy did not resolve within {limit} steps")]
    StrategyUnresolved { limit: usize },

    /// The underlying document is not well-formed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }
}
