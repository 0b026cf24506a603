//! Namespace URIs and prefix bookkeeping
//!
//! Decoding works purely on namespace URIs; prefixes only matter when a
//! packet is written back out, where each namespace needs a short, unique
//! prefix declared on the `rdf:RDF` element.

use crate::core::error::{XmpError, XmpResult};
use std::collections::BTreeMap;

/// Well-known namespace URIs
pub mod ns {
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// XML namespace (for xml:lang)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Adobe `x:xmpmeta` wrapper namespace
    pub const ADOBE_META: &str = "adobe:ns:meta/";
    /// Dublin Core namespace
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// XMP Basic namespace
    pub const XMP: &str = "http://ns.adobe.com/xap/1.0/";
    /// XMP Rights namespace
    pub const XMP_RIGHTS: &str = "http://ns.adobe.com/xap/1.0/rights/";
    /// XMP Media Management namespace
    pub const XMP_MM: &str = "http://ns.adobe.com/xap/1.0/mm/";
    /// EXIF namespace
    pub const EXIF: &str = "http://ns.adobe.com/exif/1.0/";
    /// TIFF namespace
    pub const TIFF: &str = "http://ns.adobe.com/tiff/1.0/";
    /// Photoshop namespace
    pub const PHOTOSHOP: &str = "http://ns.adobe.com/photoshop/1.0/";
    /// PDF namespace
    pub const PDF: &str = "http://ns.adobe.com/pdf/1.3/";
    /// PDF/A identification namespace
    pub const PDFA_ID: &str = "http://www.aiim.org/pdfa/ns/id/";
}

/// Conventional prefixes for the namespaces in [`ns`].
const WELL_KNOWN: &[(&str, &str)] = &[
    (ns::RDF, "rdf"),
    (ns::XML, "xml"),
    (ns::ADOBE_META, "x"),
    (ns::DC, "dc"),
    (ns::XMP, "xmp"),
    (ns::XMP_RIGHTS, "xmpRights"),
    (ns::XMP_MM, "xmpMM"),
    (ns::EXIF, "exif"),
    (ns::TIFF, "tiff"),
    (ns::PHOTOSHOP, "photoshop"),
    (ns::PDF, "pdf"),
    (ns::PDFA_ID, "pdfaid"),
];

/// Conventional prefix for a well-known namespace URI.
pub fn well_known_prefix(uri: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(known, _)| *known == uri)
        .map(|(_, prefix)| *prefix)
}

/// Bidirectional map of namespace URI and prefix
///
/// A prefix is bound to at most one URI, so the map can be written out as a
/// set of `xmlns:` declarations.
#[derive(Debug, Clone, Default)]
pub struct NamespaceMap {
    uri_to_prefix: BTreeMap<String, String>,
    prefix_to_uri: BTreeMap<String, String>,
}

impl NamespaceMap {
    /// Create an empty namespace map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace URI with a prefix
    ///
    /// Returns an error if the prefix is already bound to a different URI.
    /// Registering the same pair twice is a no-op.
    pub fn register(&mut self, uri: &str, prefix: &str) -> XmpResult<()> {
        if let Some(existing_uri) = self.prefix_to_uri.get(prefix) {
            if existing_uri != uri {
                return Err(XmpError::BadParam(format!(
                    "Prefix '{}' is already registered to '{}'",
                    prefix, existing_uri
                )));
            }
            return Ok(());
        }

        self.uri_to_prefix
            .insert(uri.to_string(), prefix.to_string());
        self.prefix_to_uri
            .insert(prefix.to_string(), uri.to_string());
        Ok(())
    }

    /// Bind `uri` to `preferred`, or to a generated `nsN` prefix when
    /// `preferred` is missing or already taken. Returns the bound prefix.
    pub fn bind(&mut self, uri: &str, preferred: Option<&str>) -> String {
        if let Some(prefix) = self.get_prefix(uri) {
            return prefix.to_string();
        }
        if let Some(prefix) = preferred {
            if !prefix.is_empty() && self.register(uri, prefix).is_ok() {
                return prefix.to_string();
            }
        }
        let mut n = 1;
        loop {
            let candidate = format!("ns{}", n);
            if !self.has_prefix(&candidate) {
                self.uri_to_prefix.insert(uri.to_string(), candidate.clone());
                self.prefix_to_uri.insert(candidate.clone(), uri.to_string());
                return candidate;
            }
            n += 1;
        }
    }

    /// Get the prefix for a namespace URI
    pub fn get_prefix(&self, uri: &str) -> Option<&str> {
        self.uri_to_prefix.get(uri).map(|s| s.as_str())
    }

    /// Get the URI for a namespace prefix
    pub fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.prefix_to_uri.get(prefix).map(|s| s.as_str())
    }

    /// Check if a namespace prefix is registered
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefix_to_uri.contains_key(prefix)
    }

    /// Iterate over `(prefix, uri)` pairs in prefix order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefix_to_uri
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }
}
