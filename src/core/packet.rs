//! Decoded XMP packets
//!
//! A [`Packet`] is the result of one decode call: the resource identifier
//! from `rdf:about` and one namespace model per namespace URI encountered.

use crate::core::about::ResourceUri;
use crate::core::error::{XmpError, XmpResult};
use crate::core::generic::GenericModel;
use crate::core::model::{Model, Schema};
use crate::core::parser::XmpParser;
use crate::core::registry::{default_registry, ModelRegistry};
use crate::core::serializer::{SerializeOptions, XmpSerializer};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// Decoded XMP packet
///
/// # Example
///
/// ```rust
/// use xmpmodel::{DublinCore, Packet};
///
/// let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
///                       xmlns:dc="http://purl.org/dc/elements/1.1/">
///   <rdf:Description rdf:about="urn:example:1">
///     <dc:coverage>Global</dc:coverage>
///   </rdf:Description>
/// </rdf:RDF>"#;
///
/// let packet: Packet = xml.parse()?;
/// assert_eq!(packet.about().map(|u| u.as_str()), Some("urn:example:1"));
/// let dc = packet.get::<DublinCore>().unwrap();
/// assert_eq!(dc.coverage.as_str(), "Global");
/// # Ok::<(), xmpmodel::XmpError>(())
/// ```
#[derive(Debug, Default)]
pub struct Packet {
    about: Option<ResourceUri>,
    models: BTreeMap<String, Box<dyn Model>>,
}

impl Packet {
    /// Create an empty packet
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a packet using the default registry
    pub fn read<R: BufRead>(reader: R) -> XmpResult<Self> {
        Self::read_with(reader, default_registry())
    }

    /// Decode a packet using the decoders in `registry`
    pub fn read_with<R: BufRead>(reader: R, registry: &ModelRegistry) -> XmpResult<Self> {
        XmpParser::with_registry(registry).parse_reader(reader)
    }

    /// Decode the packet stored in the file at `path`
    pub fn read_file<P: AsRef<Path>>(path: P) -> XmpResult<Self> {
        Self::read_file_with(path, default_registry())
    }

    /// Decode the packet stored in the file at `path` using `registry`
    ///
    /// The file is closed when this returns, on success and on error.
    pub fn read_file_with<P: AsRef<Path>>(path: P, registry: &ModelRegistry) -> XmpResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::read_with(BufReader::new(file), registry)
    }

    /// Encode the packet with default options
    pub fn write<W: Write>(&self, writer: W) -> XmpResult<()> {
        XmpSerializer::new().write_to(self, writer)
    }

    /// Encode the packet with prefixes from `registry` and the given options
    pub fn write_with<W: Write>(
        &self,
        writer: W,
        registry: &ModelRegistry,
        options: SerializeOptions,
    ) -> XmpResult<()> {
        XmpSerializer::with_registry(registry)
            .with_options(options)
            .write_to(self, writer)
    }

    /// Encode the packet to a string with default options
    pub fn to_xml_string(&self) -> XmpResult<String> {
        XmpSerializer::new().serialize(self)
    }

    /// Resource identifier of the description
    pub fn about(&self) -> Option<&ResourceUri> {
        self.about.as_ref()
    }

    /// Set the resource identifier
    pub fn set_about(&mut self, about: Option<ResourceUri>) {
        self.about = about;
    }

    /// Namespace models keyed by namespace URI
    pub fn models(&self) -> &BTreeMap<String, Box<dyn Model>> {
        &self.models
    }

    /// Model for `namespace`, whatever its type
    pub fn model(&self, namespace: &str) -> Option<&dyn Model> {
        self.models.get(namespace).map(|m| m.as_ref())
    }

    /// Typed model for a registered schema
    ///
    /// Returns `None` if the namespace never appeared, or if it was decoded
    /// by a different model (for example the generic fallback when the
    /// schema was not registered).
    pub fn get<M: Schema>(&self) -> Option<&M> {
        self.models
            .get(M::NAMESPACE)
            .and_then(|m| m.as_any().downcast_ref::<M>())
    }

    /// Undecoded properties of a namespace without a registered model
    pub fn generic(&self, namespace: &str) -> Option<&GenericModel> {
        self.models
            .get(namespace)
            .and_then(|m| m.as_any().downcast_ref::<GenericModel>())
    }

    /// Add or replace the model of a typed schema
    pub fn insert<M: Schema>(&mut self, model: M) {
        self.models.insert(M::NAMESPACE.to_string(), Box::new(model));
    }

    /// Add or replace the model stored for `namespace`
    pub fn insert_model(&mut self, namespace: &str, model: Box<dyn Model>) {
        self.models.insert(namespace.to_string(), model);
    }

    /// Take the model stored for `namespace` out of the packet
    pub(crate) fn remove_model(&mut self, namespace: &str) -> Option<Box<dyn Model>> {
        self.models.remove(namespace)
    }

    /// True if no namespace has any property
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromStr for Packet {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::read(s.as_bytes())
    }
}
