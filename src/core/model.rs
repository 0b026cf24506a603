//! Namespace models
//!
//! A packet holds one model per namespace URI. The parser and the encoder
//! only ever see models through the [`Model`] trait, so new namespaces can
//! be added without touching either.

use crate::core::error::XmpResult;
use crate::core::serializer::Emitter;
use crate::core::token::TokenSpan;
use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

/// Capabilities every namespace model provides
pub trait Model: fmt::Debug + Send + Sync + 'static {
    /// Decode one more property of this namespace into the model.
    ///
    /// `name` is the property's local name and `span` its content. Unknown
    /// names must be ignored; an error means the content of a recognized
    /// property is malformed.
    fn decode_property(&mut self, name: &str, span: TokenSpan) -> XmpResult<()>;

    /// Emit one child element of `rdf:Description` per populated property.
    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()>;

    /// Add every namespace URI the encoded output uses to `set`.
    fn namespaces(&self, set: &mut BTreeSet<String>);

    /// Access to the concrete type, for typed lookups on a packet.
    fn as_any(&self) -> &dyn Any;
}

/// A strongly typed model for one well-known namespace
pub trait Schema: Model + Default {
    /// Namespace URI the model decodes
    const NAMESPACE: &'static str;
    /// Conventional prefix used when encoding
    const PREFIX: &'static str;
}

/// Decode function for a [`Schema`], suitable for registry entries.
///
/// An absent model is created fresh from `Default`.
pub fn decode_schema<M: Schema>(
    existing: Option<Box<dyn Model>>,
    name: &str,
    span: TokenSpan,
) -> XmpResult<Box<dyn Model>> {
    let mut model = existing.unwrap_or_else(|| Box::new(M::default()));
    model.decode_property(name, span)?;
    Ok(model)
}
