//! Discriminator-driven decoding of polymorphic collections.

use std::collections::BTreeMap;

use crate::decode::ValueDecoder;
use crate::error::DecodeError;

/// Well-known field names usable as a type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscriminatorKey {
    Type,
    ModelType,
    Code,
}

impl DiscriminatorKey {
    /// The field name the discriminator is read from.
    pub fn as_str(self) -> &'static str {
        match self {
            DiscriminatorKey::Type => "type",
            DiscriminatorKey::ModelType => "modelType",
            DiscriminatorKey::Code => "code",
        }
    }
}

/// Decode function registered for one discriminator value.
pub type VariantFn<B> = fn(ValueDecoder<'_>) -> Result<B, DecodeError>;

/// Registry binding one polymorphic family: which discriminator field to
/// read, and which decode function handles each discriminator value.
///
/// The registry must be total over the family's discriminator values; an
/// unregistered value fails the decode with
/// [`DecodeError::UnknownDiscriminator`], never a silent default. Built once
/// per family and passed by reference.
pub struct TypeFamily<B> {
    discriminator: DiscriminatorKey,
    variants: BTreeMap<String, VariantFn<B>>,
}

impl<B> TypeFamily<B> {
    pub fn new(discriminator: DiscriminatorKey) -> Self {
        TypeFamily {
            discriminator,
            variants: BTreeMap::new(),
        }
    }

    /// Registers the decode function for one discriminator value.
    pub fn variant(mut self, tag: impl Into<String>, decode: VariantFn<B>) -> Self {
        self.variants.insert(tag.into(), decode);
        self
    }

    pub fn discriminator(&self) -> DiscriminatorKey {
        self.discriminator
    }

    pub(crate) fn resolve(&self, tag: &str) -> Option<VariantFn<B>> {
        self.variants.get(tag).copied()
    }
}
