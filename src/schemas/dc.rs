//! Dublin Core namespace model
//!
//! The fifteen elements of the Dublin Core Metadata Element Set, with the
//! value containers XMP assigns them.

use crate::core::error::XmpResult;
use crate::core::model::{Model, Schema};
use crate::core::namespace::ns;
use crate::core::serializer::Emitter;
use crate::core::token::TokenSpan;
use crate::types::{Date, LangAlt, OrderedArray, PropertyValue, ProperName, Text, UnorderedArray};
use std::any::Any;
use std::collections::BTreeSet;

/// Dublin Core properties (`http://purl.org/dc/elements/1.1/`)
///
/// Every field starts out empty. Decoding a property name this model does
/// not know leaves all fields unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DublinCore {
    /// Entities responsible for contributions to the resource
    pub contributor: UnorderedArray<ProperName>,
    /// Extent or scope of the resource
    pub coverage: Text,
    /// Entities primarily responsible for the resource, in order of precedence
    pub creator: OrderedArray<ProperName>,
    /// Dates associated with events in the life cycle of the resource
    pub date: OrderedArray<Date>,
    /// Textual descriptions of the content, per language
    pub description: LangAlt,
    /// MIME type of the resource
    pub format: Text,
    /// Unambiguous reference to the resource
    pub identifier: Text,
    /// Languages used in the content
    pub language: UnorderedArray<Text>,
    /// Entities responsible for making the resource available
    pub publisher: UnorderedArray<ProperName>,
    /// Related resources
    pub relation: UnorderedArray<Text>,
    /// Rights statements, per language
    pub rights: LangAlt,
    /// Resource from which this one is derived
    pub source: Text,
    /// Keywords or phrases describing the topic
    pub subject: UnorderedArray<Text>,
    /// Title, per language
    pub title: LangAlt,
    /// Nature or genre of the resource
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub r#type: UnorderedArray<Text>,
}

fn decode_field<V: PropertyValue>(field: &mut V, span: &TokenSpan) -> XmpResult<()> {
    *field = field.decode_another(span)?;
    Ok(())
}

impl Schema for DublinCore {
    const NAMESPACE: &'static str = ns::DC;
    const PREFIX: &'static str = "dc";
}

impl Model for DublinCore {
    fn decode_property(&mut self, name: &str, span: TokenSpan) -> XmpResult<()> {
        match name {
            "contributor" => decode_field(&mut self.contributor, &span),
            "coverage" => decode_field(&mut self.coverage, &span),
            "creator" => decode_field(&mut self.creator, &span),
            "date" => decode_field(&mut self.date, &span),
            "description" => decode_field(&mut self.description, &span),
            "format" => decode_field(&mut self.format, &span),
            "identifier" => decode_field(&mut self.identifier, &span),
            "language" => decode_field(&mut self.language, &span),
            "publisher" => decode_field(&mut self.publisher, &span),
            "relation" => decode_field(&mut self.relation, &span),
            "rights" => decode_field(&mut self.rights, &span),
            "source" => decode_field(&mut self.source, &span),
            "subject" => decode_field(&mut self.subject, &span),
            "title" => decode_field(&mut self.title, &span),
            "type" => decode_field(&mut self.r#type, &span),
            _ => {
                tracing::debug!(property = name, "ignoring unknown Dublin Core property");
                Ok(())
            }
        }
    }

    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()> {
        out.property(ns::DC, "contributor", &self.contributor)?;
        out.property(ns::DC, "coverage", &self.coverage)?;
        out.property(ns::DC, "creator", &self.creator)?;
        out.property(ns::DC, "date", &self.date)?;
        out.property(ns::DC, "description", &self.description)?;
        out.property(ns::DC, "format", &self.format)?;
        out.property(ns::DC, "identifier", &self.identifier)?;
        out.property(ns::DC, "language", &self.language)?;
        out.property(ns::DC, "publisher", &self.publisher)?;
        out.property(ns::DC, "relation", &self.relation)?;
        out.property(ns::DC, "rights", &self.rights)?;
        out.property(ns::DC, "source", &self.source)?;
        out.property(ns::DC, "subject", &self.subject)?;
        out.property(ns::DC, "title", &self.title)?;
        out.property(ns::DC, "type", &self.r#type)
    }

    fn namespaces(&self, set: &mut BTreeSet<String>) {
        set.insert(ns::DC.to_string());
        set.insert(ns::RDF.to_string());
        if [&self.description, &self.rights, &self.title]
            .iter()
            .any(|alt| !alt.is_empty())
        {
            set.insert(ns::XML.to_string());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::Token;
    use crate::types::Scalar;

    fn seq(kind: &str, items: &[&str]) -> TokenSpan {
        let mut tokens = vec![Token::start(ns::RDF, kind)];
        for item in items {
            tokens.push(Token::start(ns::RDF, "li"));
            tokens.push(Token::text(*item));
            tokens.push(Token::end(ns::RDF, "li"));
        }
        tokens.push(Token::end(ns::RDF, kind));
        tokens.into()
    }

    #[test]
    fn test_decode_simple_and_arrays() {
        let mut dc = DublinCore::default();
        dc.decode_property("coverage", vec![Token::text("Global")].into())
            .unwrap();
        dc.decode_property("creator", seq("Seq", &["Alice", "Bob"]))
            .unwrap();
        dc.decode_property("subject", seq("Bag", &["xmp", "rdf"]))
            .unwrap();
        dc.decode_property("date", seq("Seq", &["2024-05-01"]))
            .unwrap();

        assert_eq!(dc.coverage.as_str(), "Global");
        let creators: Vec<&str> = dc.creator.iter().map(ProperName::as_str).collect();
        assert_eq!(creators, vec!["Alice", "Bob"]);
        assert!(dc.subject.contains(&Text::new("rdf")));
        assert_eq!(dc.date[0], Date::parse_text("2024-05-01").unwrap());
    }

    #[test]
    fn test_unknown_property_is_ignored() {
        let mut dc = DublinCore::default();
        dc.decode_property("colour", vec![Token::text("blue")].into())
            .unwrap();
        assert_eq!(dc, DublinCore::default());
    }

    #[test]
    fn test_type_property() {
        let mut dc = DublinCore::default();
        dc.decode_property("type", seq("Bag", &["Image"])).unwrap();
        assert_eq!(dc.r#type.len(), 1);
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let mut dc = DublinCore::default();
        assert!(dc
            .decode_property("date", vec![Token::text("yesterday")].into())
            .is_err());
        assert!(dc
            .decode_property("creator", seq("Seq", &[" "]))
            .is_err());
    }

    #[test]
    fn test_namespaces() {
        let mut set = BTreeSet::new();
        DublinCore::default().namespaces(&mut set);
        assert!(set.contains(ns::DC));
        assert!(!set.contains(ns::XML));

        let dc = DublinCore {
            title: LangAlt::with_default("Sunset"),
            ..Default::default()
        };
        let mut set = BTreeSet::new();
        dc.namespaces(&mut set);
        assert!(set.contains(ns::XML));
    }
}
