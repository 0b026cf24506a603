//! Array-valued properties
//!
//! RDF wraps multi-valued properties in a container element: `rdf:Seq` for
//! ordered lists, `rdf:Bag` for unordered collections and `rdf:Alt` for
//! alternatives such as translations. Each item is an `rdf:li` element.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::ns;
use crate::core::serializer::Emitter;
use crate::core::token::{elements, has_elements, is_blank, text_content, Attribute, QualifiedName, Token};
use crate::types::value::{PropertyValue, Scalar};
use std::ops::Deref;

/// Language used for items without `xml:lang`
pub const DEFAULT_LANGUAGE: &str = "x-default";

/// One `rdf:li` item of a container, or a bare text value
struct Item<'a> {
    attributes: &'a [Attribute],
    content: &'a [Token],
}

impl<'a> Item<'a> {
    fn language(&self) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(ns::XML, "lang"))
            .map(|a| a.value.as_str())
    }
}

/// Items of an array property
///
/// Any RDF container kind is accepted. A property holding plain text is
/// read as a single item, which is how the attribute shorthand
/// `dc:creator="Alice"` arrives.
fn list_items(span: &[Token]) -> XmpResult<Vec<Item<'_>>> {
    if !has_elements(span) {
        if is_blank(span) {
            return Ok(Vec::new());
        }
        return Ok(vec![Item {
            attributes: &[],
            content: span,
        }]);
    }

    let outer = elements(span)?;
    let [container] = outer.as_slice() else {
        return Err(XmpError::BadValue(format!(
            "expected one RDF container, found {} elements",
            outer.len()
        )));
    };
    if !["Seq", "Bag", "Alt"].iter().any(|kind| container.name.is_rdf(kind)) {
        return Err(XmpError::BadValue(format!(
            "expected rdf:Seq, rdf:Bag or rdf:Alt, found {}{}",
            container.name.namespace, container.name.local
        )));
    }

    elements(container.content)?
        .into_iter()
        .map(|child| {
            if !child.name.is_rdf("li") {
                return Err(XmpError::BadValue(format!(
                    "expected rdf:li, found {}{}",
                    child.name.namespace, child.name.local
                )));
            }
            Ok(Item {
                attributes: child.attributes,
                content: child.content,
            })
        })
        .collect()
}

fn decode_items<T: Scalar>(span: &[Token]) -> XmpResult<Vec<T>> {
    list_items(span)?
        .iter()
        .map(|item| T::parse_text(&text_content(item.content)?))
        .collect()
}

fn encode_items<T: Scalar>(out: &mut Emitter<'_>, kind: &str, items: &[T]) -> XmpResult<()> {
    out.start(ns::RDF, kind, &[])?;
    for item in items {
        out.start(ns::RDF, "li", &[])?;
        out.text(&item.to_text())?;
        out.end(ns::RDF, "li")?;
    }
    out.end(ns::RDF, kind)
}

/// Ordered list, written as `rdf:Seq`
///
/// Position is significant, e.g. creators ranked by precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OrderedArray<T> {
    items: Vec<T>,
}

impl<T> OrderedArray<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Consume the list and return the items
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for OrderedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for OrderedArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for OrderedArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for OrderedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Scalar + Clone> PropertyValue for OrderedArray<T> {
    fn decode_another(&self, span: &[Token]) -> XmpResult<Self> {
        let mut items = self.items.clone();
        items.extend(decode_items::<T>(span)?);
        Ok(Self { items })
    }

    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()> {
        encode_items(out, "Seq", &self.items)
    }

    fn is_zero(&self) -> bool {
        self.items.is_empty()
    }
}

/// Unordered collection, written as `rdf:Bag`
///
/// Only membership matters: two collections are equal when they hold the
/// same items the same number of times, in any order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnorderedArray<T> {
    items: Vec<T>,
}

impl<T> UnorderedArray<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Consume the collection and return the items
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> UnorderedArray<T> {
    /// Check membership
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> Default for UnorderedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for UnorderedArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for UnorderedArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for UnorderedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: PartialEq> PartialEq for UnorderedArray<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.items.len() != other.items.len() {
            return false;
        }
        let mut matched = vec![false; other.items.len()];
        for item in &self.items {
            let found = other
                .items
                .iter()
                .enumerate()
                .position(|(i, candidate)| !matched[i] && candidate == item);
            match found {
                Some(i) => matched[i] = true,
                None => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for UnorderedArray<T> {}

impl<T: Scalar + Clone> PropertyValue for UnorderedArray<T> {
    fn decode_another(&self, span: &[Token]) -> XmpResult<Self> {
        let mut items = self.items.clone();
        items.extend(decode_items::<T>(span)?);
        Ok(Self { items })
    }

    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()> {
        encode_items(out, "Bag", &self.items)
    }

    fn is_zero(&self) -> bool {
        self.items.is_empty()
    }
}

/// Language alternative, written as `rdf:Alt` with `xml:lang` on each item
///
/// Holds at most one text per language. Items without a language tag are
/// stored under [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")
)]
pub struct LangAlt {
    entries: Vec<(String, String)>,
}

impl LangAlt {
    /// Create an empty alternative
    pub fn new() -> Self {
        Self::default()
    }

    /// Alternative with only a default-language text
    pub fn with_default(text: impl Into<String>) -> Self {
        let mut alt = Self::new();
        alt.set(DEFAULT_LANGUAGE, text);
        alt
    }

    /// Set the text for `lang`, replacing an existing one
    ///
    /// The text is trimmed, as it would be when decoded.
    pub fn set(&mut self, lang: &str, text: impl Into<String>) {
        let text = text.into().trim().to_string();
        match self.entries.iter_mut().find(|(l, _)| l.eq_ignore_ascii_case(lang)) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((lang.to_string(), text)),
        }
    }

    /// Text for `lang`, compared case-insensitively
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(lang))
            .map(|(_, text)| text.as_str())
    }

    /// Default-language text, or the first entry if there is none
    pub fn default_text(&self) -> Option<&str> {
        self.get(DEFAULT_LANGUAGE)
            .or_else(|| self.entries.first().map(|(_, text)| text.as_str()))
    }

    /// `(language, text)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no language has a text
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<(String, String)>> for LangAlt {
    fn from(entries: Vec<(String, String)>) -> Self {
        let mut alt = Self::new();
        for (lang, text) in entries {
            alt.set(&lang, text);
        }
        alt
    }
}

impl From<LangAlt> for Vec<(String, String)> {
    fn from(alt: LangAlt) -> Self {
        alt.entries
    }
}

impl PropertyValue for LangAlt {
    fn decode_another(&self, span: &[Token]) -> XmpResult<Self> {
        let mut alt = self.clone();
        for item in list_items(span)? {
            let lang = item.language().unwrap_or(DEFAULT_LANGUAGE);
            alt.set(lang, text_content(item.content)?);
        }
        Ok(alt)
    }

    fn encode(&self, out: &mut Emitter<'_>) -> XmpResult<()> {
        let lang = QualifiedName::new(ns::XML, "lang");
        out.start(ns::RDF, "Alt", &[])?;
        for (language, text) in &self.entries {
            let attributes = [Attribute::new(lang.clone(), language.as_str())];
            out.start(ns::RDF, "li", &attributes)?;
            out.text(text)?;
            out.end(ns::RDF, "li")?;
        }
        out.end(ns::RDF, "Alt")
    }

    fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProperName, Text};

    fn container(kind: &str, items: &[&str]) -> Vec<Token> {
        let mut tokens = vec![Token::text("\n  "), Token::start(ns::RDF, kind)];
        for item in items {
            tokens.push(Token::start(ns::RDF, "li"));
            tokens.push(Token::text(*item));
            tokens.push(Token::end(ns::RDF, "li"));
        }
        tokens.push(Token::end(ns::RDF, kind));
        tokens.push(Token::text("\n"));
        tokens
    }

    fn names(items: &[&str]) -> Vec<ProperName> {
        items.iter().map(|n| ProperName::new(*n).unwrap()).collect()
    }

    #[test]
    fn test_ordered_decode_preserves_order() {
        let array = OrderedArray::<ProperName>::default()
            .decode_another(&container("Seq", &["A", "B", "C"]))
            .unwrap();
        assert_eq!(&*array, names(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn test_ordered_decode_appends() {
        let first = OrderedArray::<Text>::default()
            .decode_another(&container("Seq", &["A"]))
            .unwrap();
        let second = first.decode_another(&container("Seq", &["B"])).unwrap();
        let texts: Vec<&str> = second.iter().map(Text::as_str).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[test]
    fn test_bare_text_is_single_item() {
        let array = OrderedArray::<ProperName>::default()
            .decode_another(&[Token::text("Alice")])
            .unwrap();
        assert_eq!(&*array, names(&["Alice"]).as_slice());

        let empty = OrderedArray::<ProperName>::default()
            .decode_another(&[Token::text("  ")])
            .unwrap();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_unordered_equality_ignores_order() {
        let a: UnorderedArray<Text> = vec![Text::new("A"), Text::new("B"), Text::new("C")].into();
        let b: UnorderedArray<Text> = vec![Text::new("C"), Text::new("A"), Text::new("B")].into();
        let c: UnorderedArray<Text> = vec![Text::new("A"), Text::new("A"), Text::new("B")].into();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.contains(&Text::new("B")));
    }

    #[test]
    fn test_unordered_accepts_any_container() {
        let array = UnorderedArray::<Text>::default()
            .decode_another(&container("Seq", &["x", "y"]))
            .unwrap();
        assert_eq!(array.len(), 2);
    }

    #[test]
    fn test_rejects_non_container() {
        let span = vec![
            Token::start("http://example.com/", "List"),
            Token::end("http://example.com/", "List"),
        ];
        assert!(OrderedArray::<Text>::default().decode_another(&span).is_err());
    }

    #[test]
    fn test_rejects_non_li_items() {
        let span = vec![
            Token::start(ns::RDF, "Bag"),
            Token::start(ns::RDF, "item"),
            Token::end(ns::RDF, "item"),
            Token::end(ns::RDF, "Bag"),
        ];
        assert!(UnorderedArray::<Text>::default().decode_another(&span).is_err());
    }

    #[test]
    fn test_rejects_bad_item() {
        let err = OrderedArray::<ProperName>::default()
            .decode_another(&container("Seq", &["Alice", ""]))
            .unwrap_err();
        assert!(matches!(err, XmpError::BadValue(_)));
    }

    #[test]
    fn test_lang_alt_decode() {
        let lang = QualifiedName::new(ns::XML, "lang");
        let span = vec![
            Token::start(ns::RDF, "Alt"),
            Token::Start {
                name: QualifiedName::new(ns::RDF, "li"),
                attributes: vec![Attribute::new(lang.clone(), "x-default")],
            },
            Token::text("Title"),
            Token::end(ns::RDF, "li"),
            Token::Start {
                name: QualifiedName::new(ns::RDF, "li"),
                attributes: vec![Attribute::new(lang, "de-DE")],
            },
            Token::text("Titel"),
            Token::end(ns::RDF, "li"),
            Token::end(ns::RDF, "Alt"),
        ];
        let alt = LangAlt::default().decode_another(&span).unwrap();
        assert_eq!(alt.len(), 2);
        assert_eq!(alt.default_text(), Some("Title"));
        assert_eq!(alt.get("de-de"), Some("Titel"));

        let updated = alt.decode_another(&[Token::text("New title")]).unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated.default_text(), Some("New title"));
    }

    #[test]
    fn test_lang_alt_set_trims() {
        let mut alt = LangAlt::with_default(" T ");
        alt.set("de", "\tTitel\n");
        assert_eq!(alt.default_text(), Some("T"));
        assert_eq!(alt.get("de"), Some("Titel"));

        let from_pairs = LangAlt::from(vec![("x-default".to_string(), " T ".to_string())]);
        assert_eq!(from_pairs.default_text(), Some("T"));
    }

    #[test]
    fn test_lang_alt_default_falls_back_to_first() {
        let mut alt = LangAlt::new();
        alt.set("fr", "Titre");
        assert_eq!(alt.default_text(), Some("Titre"));
        assert_eq!(LangAlt::with_default("T").get(DEFAULT_LANGUAGE), Some("T"));
    }
}
