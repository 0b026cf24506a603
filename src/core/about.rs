//! Resource identifiers from `rdf:about`
//!
//! XMP sidecars often describe their resource with a relative reference
//! such as `photo.jpg`, so the identifier is a URI reference rather than an
//! absolute URL.

use std::fmt;
use std::str::FromStr;
use url::{ParseError, Url};

/// Base used only to check the syntax of relative references
const SYNTAX_BASE: &str = "http://relative.invalid/";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    Absolute(Url),
    Relative(String),
}

/// URI reference naming the resource a packet describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri(Repr);

impl ResourceUri {
    /// Parse an absolute URI or a relative reference
    ///
    /// # Example
    ///
    /// ```rust
    /// use xmpmodel::ResourceUri;
    ///
    /// let uri = ResourceUri::parse("photo.jpg").unwrap();
    /// assert!(uri.is_relative());
    /// assert_eq!(uri.as_str(), "photo.jpg");
    /// assert!(ResourceUri::parse("http://[::1").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        match Url::parse(value) {
            Ok(url) => Ok(Self(Repr::Absolute(url))),
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(SYNTAX_BASE)?.join(value)?;
                Ok(Self(Repr::Relative(value.to_string())))
            }
            Err(err) => Err(err),
        }
    }

    /// The identifier as written (absolute URLs in normalized form)
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Absolute(url) => url.as_str(),
            Repr::Relative(reference) => reference,
        }
    }

    /// The parsed URL, for absolute identifiers
    pub fn as_url(&self) -> Option<&Url> {
        match &self.0 {
            Repr::Absolute(url) => Some(url),
            Repr::Relative(_) => None,
        }
    }

    /// True for a relative reference
    pub fn is_relative(&self) -> bool {
        matches!(self.0, Repr::Relative(_))
    }
}

impl From<Url> for ResourceUri {
    fn from(url: Url) -> Self {
        Self(Repr::Absolute(url))
    }
}

impl FromStr for ResourceUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute() {
        let uri = ResourceUri::parse("urn:example:1").unwrap();
        assert!(!uri.is_relative());
        assert_eq!(uri.as_url().unwrap().scheme(), "urn");
        assert_eq!(uri.to_string(), "urn:example:1");
    }

    #[test]
    fn test_relative() {
        for reference in ["photo.jpg", "../images/photo.jpg", "#frag"] {
            let uri = ResourceUri::parse(reference).unwrap();
            assert!(uri.is_relative());
            assert!(uri.as_url().is_none());
            assert_eq!(uri.as_str(), reference);
        }
    }

    #[test]
    fn test_invalid() {
        assert!(ResourceUri::parse("http://[::1").is_err());
        assert!(ResourceUri::parse("//[bad/photo.jpg").is_err());
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            ResourceUri::parse("photo.jpg").unwrap(),
            "photo.jpg".parse::<ResourceUri>().unwrap()
        );
        assert_ne!(
            ResourceUri::parse("photo.jpg").unwrap(),
            ResourceUri::parse("other.jpg").unwrap()
        );
    }
}
