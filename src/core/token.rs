//! Owned XML tokens
//!
//! The tokenizer hands out events that borrow its internal buffer. Everything
//! the parser keeps beyond one loop iteration is copied into the types below,
//! so a captured property span can outlive the reader.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::ns;
use std::ops::Deref;

/// Namespace-qualified element or attribute name
///
/// `namespace` is empty for names without a namespace binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Namespace URI
    pub namespace: String,
    /// Local part of the name
    pub local: String,
}

impl QualifiedName {
    /// Create a new qualified name
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Check namespace and local name at once
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }

    /// Check for an element in the RDF namespace
    pub fn is_rdf(&self, local: &str) -> bool {
        self.is(ns::RDF, local)
    }
}

/// Attribute on a start element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: QualifiedName,
    /// Unescaped attribute value
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: QualifiedName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// One XML parse event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start of an element (empty elements are expanded to start + end)
    Start {
        /// Element name
        name: QualifiedName,
        /// Attributes, without namespace declarations
        attributes: Vec<Attribute>,
    },
    /// End of an element
    End {
        /// Element name
        name: QualifiedName,
    },
    /// Character data, unescaped
    Text(String),
    /// Comment
    Comment(String),
}

impl Token {
    /// Shorthand for a start element without attributes
    pub fn start(namespace: &str, local: &str) -> Self {
        Token::Start {
            name: QualifiedName::new(namespace, local),
            attributes: Vec::new(),
        }
    }

    /// Shorthand for an end element
    pub fn end(namespace: &str, local: &str) -> Self {
        Token::End {
            name: QualifiedName::new(namespace, local),
        }
    }

    /// Shorthand for a text token
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text(text.into())
    }

    fn is_blank(&self) -> bool {
        match self {
            Token::Text(text) => text.trim().is_empty(),
            Token::Comment(_) => true,
            _ => false,
        }
    }
}

/// Owned sequence of tokens captured between a property's start and end tags
///
/// The property element itself is not part of the span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSpan {
    tokens: Vec<Token>,
}

impl TokenSpan {
    /// Create an empty span
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token, merging adjacent text
    pub fn push(&mut self, token: Token) {
        if let Token::Text(more) = &token {
            if let Some(Token::Text(text)) = self.tokens.last_mut() {
                text.push_str(more);
                return;
            }
        }
        self.tokens.push(token);
    }

    /// Consume the span and return the tokens
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl Deref for TokenSpan {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for TokenSpan {
    fn from(tokens: Vec<Token>) -> Self {
        let mut span = TokenSpan::new();
        for token in tokens {
            span.push(token);
        }
        span
    }
}

impl FromIterator<Token> for TokenSpan {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// Child element found by [`elements`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    /// Element name
    pub name: &'a QualifiedName,
    /// Element attributes
    pub attributes: &'a [Attribute],
    /// Tokens between the element's start and end tags
    pub content: &'a [Token],
}

impl<'a> Element<'a> {
    /// Value of the attribute `namespace`/`local`, if present
    pub fn attribute(&self, namespace: &str, local: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(namespace, local))
            .map(|a| a.value.as_str())
    }
}

/// Top-level text of a span, trimmed
///
/// Fails if the span contains elements: a simple value cannot carry
/// structure.
pub fn text_content(tokens: &[Token]) -> XmpResult<String> {
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Text(t) => text.push_str(t),
            Token::Comment(_) => {}
            Token::Start { name, .. } => {
                return Err(XmpError::BadValue(format!(
                    "expected simple text, found element <{}{}>",
                    name.namespace, name.local
                )))
            }
            Token::End { name } => {
                return Err(XmpError::BadValue(format!(
                    "unbalanced end element </{}{}>",
                    name.namespace, name.local
                )))
            }
        }
    }
    Ok(text.trim().to_string())
}

/// Top-level child elements of a span
///
/// Whitespace and comments between elements are skipped; any other text
/// next to elements is rejected as mixed content.
pub fn elements(tokens: &[Token]) -> XmpResult<Vec<Element<'_>>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        match &tokens[pos] {
            Token::Start { name, attributes } => {
                let close = matching_end(tokens, pos)?;
                out.push(Element {
                    name,
                    attributes,
                    content: &tokens[pos + 1..close],
                });
                pos = close + 1;
            }
            Token::End { name } => {
                return Err(XmpError::BadValue(format!(
                    "unbalanced end element </{}{}>",
                    name.namespace, name.local
                )))
            }
            token if token.is_blank() => pos += 1,
            Token::Text(text) => {
                return Err(XmpError::BadValue(format!(
                    "unexpected text '{}' between elements",
                    text.trim()
                )))
            }
            Token::Comment(_) => pos += 1,
        }
    }
    Ok(out)
}

/// True if the span has no elements and no non-blank text
pub fn is_blank(tokens: &[Token]) -> bool {
    tokens.iter().all(Token::is_blank)
}

/// True if the span holds at least one element
pub fn has_elements(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| matches!(t, Token::Start { .. }))
}

fn matching_end(tokens: &[Token], start: usize) -> XmpResult<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        match token {
            Token::Start { .. } => depth += 1,
            Token::End { .. } => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(XmpError::BadValue("unterminated element in span".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn li(text: &str) -> Vec<Token> {
        vec![
            Token::start(ns::RDF, "li"),
            Token::text(text),
            Token::end(ns::RDF, "li"),
        ]
    }

    #[test]
    fn test_push_merges_text() {
        let mut span = TokenSpan::new();
        span.push(Token::text("a "));
        span.push(Token::text("&"));
        span.push(Token::text(" b"));
        assert_eq!(&*span, &[Token::text("a & b")]);
    }

    #[test]
    fn test_text_content() {
        let tokens = vec![Token::text("  Global\n")];
        assert_eq!(text_content(&tokens).unwrap(), "Global");
        assert_eq!(text_content(&[]).unwrap(), "");
        assert!(text_content(&li("x")).is_err());
    }

    #[test]
    fn test_elements_skips_whitespace() {
        let mut tokens = vec![Token::text("\n  ")];
        tokens.extend(li("A"));
        tokens.push(Token::Comment("note".to_string()));
        tokens.extend(li("B"));
        tokens.push(Token::text("\n"));

        let found = elements(&tokens).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].name.is_rdf("li"));
        assert_eq!(text_content(found[1].content).unwrap(), "B");
    }

    #[test]
    fn test_elements_nested() {
        let mut tokens = vec![Token::start(ns::RDF, "Seq")];
        tokens.extend(li("A"));
        tokens.push(Token::end(ns::RDF, "Seq"));

        let found = elements(&tokens).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].name.is_rdf("Seq"));
        assert_eq!(found[0].content.len(), 3);
    }

    #[test]
    fn test_elements_rejects_mixed_content() {
        let mut tokens = li("A");
        tokens.push(Token::text("stray"));
        assert!(elements(&tokens).is_err());
    }

    #[test]
    fn test_elements_rejects_unterminated() {
        let tokens = vec![Token::start(ns::RDF, "li"), Token::text("A")];
        assert!(elements(&tokens).is_err());
    }
}
