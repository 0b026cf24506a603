//! Property value containers
//!
//! Every container decodes "one more occurrence" of a property from a token
//! span and writes itself back as the content of a property element. Scalar
//! values overwrite on decode, arrays append.

use crate::core::error::{XmpError, XmpResult};
use crate::core::serializer::Emitter;
use crate::core::token::Token;
use std::fmt;

/// Contract shared by all property value containers
pub trait PropertyValue: Default {
    /// Decode another occurrence of the property from `span`, given the
    /// current value.
    fn decode_another(&self, span: &[Token]) -> XmpResult<Self>;

    /// Write the value as the content of an already opened property element.
    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()>;

    /// True for the zero value, which is never written.
    fn is_zero(&self) -> bool;
}

/// A value with a plain text representation
///
/// Scalars are the item type of arrays and are property values on their own.
pub trait Scalar: Sized {
    /// Parse the trimmed text of an element
    fn parse_text(text: &str) -> XmpResult<Self>;

    /// Text written for the value
    fn to_text(&self) -> String;
}

/// Implements [`PropertyValue`] for scalars: decode replaces the value.
macro_rules! scalar_property {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::types::value::PropertyValue for $ty {
                fn decode_another(&self, span: &[$crate::core::token::Token]) -> $crate::core::error::XmpResult<Self> {
                    let text = $crate::core::token::text_content(span)?;
                    <$ty as $crate::types::value::Scalar>::parse_text(&text)
                }

                fn encode(&self, out: &mut $crate::core::serializer::Emitter<'_>) -> $crate::core::error::XmpResult<()> {
                    out.text(&$crate::types::value::Scalar::to_text(self))
                }

                fn is_zero(&self) -> bool {
                    *self == <$ty as Default>::default()
                }
            }
        )*
    };
}

pub(crate) use scalar_property;

/// Trim in place, reusing the allocation when nothing changes
fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

/// Free-form text
///
/// Leading and trailing whitespace is not significant in XMP simple values,
/// so it is removed on construction just as on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Text(String);

impl Text {
    /// Create a text value, trimmed
    pub fn new(value: impl Into<String>) -> Self {
        Self(trimmed(value.into()))
    }

    /// The text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Scalar for Text {
    fn parse_text(text: &str) -> XmpResult<Self> {
        Ok(Self::new(text))
    }

    fn to_text(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        text.0
    }
}

/// Name of a person or organization
///
/// Trimmed, and must not be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ProperName(String);

impl ProperName {
    /// Create a proper name, rejecting blank names
    pub fn new(name: impl Into<String>) -> XmpResult<Self> {
        let name = trimmed(name.into());
        if name.is_empty() {
            return Err(XmpError::BadValue("Empty proper name".to_string()));
        }
        Ok(Self(name))
    }

    /// The name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Scalar for ProperName {
    fn parse_text(text: &str) -> XmpResult<Self> {
        Self::new(text)
    }

    fn to_text(&self) -> String {
        self.0.clone()
    }
}

impl TryFrom<String> for ProperName {
    type Error = XmpError;

    fn try_from(name: String) -> XmpResult<Self> {
        Self::new(name)
    }
}

impl From<ProperName> for String {
    fn from(name: ProperName) -> Self {
        name.0
    }
}

impl fmt::Display for ProperName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

scalar_property!(Text, ProperName);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::ns;

    #[test]
    fn test_text_decode_overwrites() {
        let first = Text::default()
            .decode_another(&[Token::text(" Global ")])
            .unwrap();
        assert_eq!(first.as_str(), "Global");

        let second = first.decode_another(&[Token::text("Local")]).unwrap();
        assert_eq!(second.as_str(), "Local");
    }

    #[test]
    fn test_text_rejects_structure() {
        let span = vec![
            Token::start(ns::RDF, "Bag"),
            Token::end(ns::RDF, "Bag"),
        ];
        let err = Text::default().decode_another(&span).unwrap_err();
        assert!(matches!(err, XmpError::BadValue(_)));
    }

    #[test]
    fn test_text_zero_value() {
        assert!(Text::default().is_zero());
        assert!(!Text::new("x").is_zero());
    }

    #[test]
    fn test_construction_matches_decode() {
        let built = Text::new("  padded  ");
        let decoded = Text::default()
            .decode_another(&[Token::text(built.to_text())])
            .unwrap();
        assert_eq!(built.as_str(), "padded");
        assert_eq!(decoded, built);

        assert!(Text::new(" ").is_zero());
        assert_eq!(Text::from(String::from(" x\n")).as_str(), "x");
        assert_eq!(ProperName::new(" Bob ").unwrap().as_str(), "Bob");
    }

    #[test]
    fn test_proper_name() {
        assert_eq!(ProperName::new("Alice").unwrap().as_str(), "Alice");
        assert!(ProperName::try_from(String::new()).is_err());
        assert!(ProperName::new("  ").is_err());
        assert!(ProperName::default()
            .decode_another(&[Token::text("")])
            .is_err());
        assert_eq!(ProperName::new("Bob").unwrap().to_string(), "Bob");
    }

    #[test]
    fn test_text_from() {
        let text: Text = "value".into();
        assert_eq!(text, Text::new(String::from("value")));
    }
}
