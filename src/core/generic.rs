//! Fallback model for namespaces without a registered decoder
//!
//! Properties are kept as raw token spans and written back unchanged, so
//! metadata from unknown namespaces survives a decode/encode cycle.

use crate::core::error::XmpResult;
use crate::core::model::Model;
use crate::core::namespace::ns;
use crate::core::serializer::Emitter;
use crate::core::token::{Token, TokenSpan};
use std::any::Any;
use std::collections::BTreeSet;

/// One undecoded property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    /// Local name of the property element
    pub name: String,
    /// Content of the property element, as captured
    pub span: TokenSpan,
}

/// Properties of one namespace, kept as captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericModel {
    namespace: String,
    properties: Vec<RawProperty>,
}

impl GenericModel {
    /// Create an empty model for `namespace`
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            properties: Vec::new(),
        }
    }

    /// Namespace URI of all properties in this model
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Properties in document order
    pub fn properties(&self) -> &[RawProperty] {
        &self.properties
    }

    /// First property named `name`
    pub fn property(&self, name: &str) -> Option<&RawProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Model for GenericModel {
    fn decode_property(&mut self, name: &str, span: TokenSpan) -> XmpResult<()> {
        self.properties.push(RawProperty {
            name: name.to_string(),
            span,
        });
        Ok(())
    }

    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()> {
        for property in &self.properties {
            out.verbatim(&self.namespace, &property.name, &property.span)?;
        }
        Ok(())
    }

    fn namespaces(&self, set: &mut BTreeSet<String>) {
        set.insert(self.namespace.clone());
        set.insert(ns::RDF.to_string());
        for property in &self.properties {
            for token in property.span.iter() {
                if let Token::Start { name, attributes } = token {
                    if !name.namespace.is_empty() {
                        set.insert(name.namespace.clone());
                    }
                    for attr in attributes {
                        if !attr.name.namespace.is_empty() {
                            set.insert(attr.name.namespace.clone());
                        }
                    }
                }
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Decode a property of an unregistered namespace.
///
/// Unlike registry decode functions this one needs the namespace URI,
/// because a fresh [`GenericModel`] has to remember where it belongs.
pub fn decode(
    existing: Option<Box<dyn Model>>,
    namespace: &str,
    name: &str,
    span: TokenSpan,
) -> XmpResult<Box<dyn Model>> {
    let mut model = existing.unwrap_or_else(|| Box::new(GenericModel::new(namespace)));
    model.decode_property(name, span)?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX: &str = "http://example.com/ns/";

    #[test]
    fn test_decode_keeps_span() {
        let span: TokenSpan = vec![Token::text("42")].into();
        let model = decode(None, EX, "answer", span.clone()).unwrap();
        let model = decode(Some(model), EX, "question", TokenSpan::new()).unwrap();

        let generic = model.as_any().downcast_ref::<GenericModel>().unwrap();
        assert_eq!(generic.namespace(), EX);
        assert_eq!(generic.properties().len(), 2);
        assert_eq!(generic.property("answer").unwrap().span, span);
    }

    #[test]
    fn test_namespaces_include_nested() {
        let span: TokenSpan = vec![
            Token::start(ns::RDF, "Bag"),
            Token::start(ns::RDF, "li"),
            Token::start("http://other.example/", "thing"),
            Token::end("http://other.example/", "thing"),
            Token::end(ns::RDF, "li"),
            Token::end(ns::RDF, "Bag"),
        ]
        .into();
        let mut model = GenericModel::new(EX);
        model.decode_property("list", span).unwrap();

        let mut set = BTreeSet::new();
        model.namespaces(&mut set);
        assert!(set.contains(EX));
        assert!(set.contains(ns::RDF));
        assert!(set.contains("http://other.example/"));
    }
}
