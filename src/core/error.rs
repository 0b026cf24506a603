//! Error types for XMP operations
//!
//! This module defines all error types used by the packet decoder, the
//! namespace models and the packet encoder.

use thiserror::Error;

/// Error types for XMP operations
#[derive(Debug, Error)]
pub enum XmpError {
    /// Bad parameter provided to a function
    #[error("Bad parameter: {0}")]
    BadParam(String),

    /// A property value could not be decoded (bad date, malformed list, ...)
    #[error("Bad value: {0}")]
    BadValue(String),

    /// Parse error (malformed XML, unterminated envelope or property)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Two `rdf:Description` elements describe different resources
    #[error("Inconsistent about attributes: {first} != {second}")]
    InconsistentAbout {
        /// The resource identifier seen first
        first: String,
        /// The conflicting identifier
        second: String,
    },

    /// The `rdf:about` attribute is not a valid URI
    #[error("Invalid about URI '{value}': {source}")]
    BadAbout {
        /// The raw attribute value
        value: String,
        /// Why the URI was rejected
        #[source]
        source: url::ParseError,
    },

    /// A namespace model rejected the content of one property
    #[error("Property {namespace}{name}: {source}")]
    Property {
        /// Namespace URI of the property
        namespace: String,
        /// Local name of the property
        name: String,
        /// The underlying decode error
        #[source]
        source: Box<XmpError>,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl XmpError {
    /// Attach the namespace and local name of the property being decoded.
    pub(crate) fn in_property(self, namespace: &str, name: &str) -> Self {
        XmpError::Property {
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for XMP operations
pub type XmpResult<T> = Result<T, XmpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = XmpError::BadParam("test".to_string());
        assert!(err.to_string().contains("Bad parameter: test"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let xmp_err: XmpError = io_err.into();
        assert!(matches!(xmp_err, XmpError::IoError(_)));
    }

    #[test]
    fn test_property_context() {
        let err = XmpError::BadValue("Empty date/time string".to_string())
            .in_property("http://purl.org/dc/elements/1.1/", "date");
        let msg = err.to_string();
        assert!(msg.contains("http://purl.org/dc/elements/1.1/date"));
        assert!(msg.contains("Empty date/time string"));
        assert!(matches!(err, XmpError::Property { ref name, .. } if name == "date"));
    }
}
