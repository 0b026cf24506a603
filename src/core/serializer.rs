//! XMP XML/RDF serializer
//!
//! This module writes a [`Packet`] back to RDF/XML: the `rdf:RDF` envelope
//! with one `xmlns` declaration per namespace in use, one `rdf:Description`,
//! and the properties each namespace model emits through an [`Emitter`].

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::{ns, well_known_prefix, NamespaceMap};
use crate::core::packet::Packet;
use crate::core::registry::{default_registry, ModelRegistry};
use crate::core::token::{Attribute, Token};
use crate::types::PropertyValue;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeSet;
use std::io::{Cursor, Write};

const PACKET_ID: &str = "W5M0MpCehiHzreSzNTczkc9d";

/// Options for writing packets.
///
/// Use the builder methods to configure options.
///
/// # Example
///
/// ```rust
/// use xmpmodel::SerializeOptions;
///
/// let options = SerializeOptions::default().packet_wrapper().padding(2048);
/// assert!(options.wrap_packet);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SerializeOptions {
    /// Wrap the output in `<?xpacket?>` processing instructions
    pub wrap_packet: bool,
    /// Bytes of whitespace padding before the packet trailer
    pub padding: usize,
    /// Mark the packet as read-only (`end="r"`)
    pub read_only: bool,
    /// Indentation width, `None` for compact output
    pub indent: Option<usize>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            wrap_packet: false,
            padding: 0,
            read_only: false,
            indent: Some(2),
        }
    }
}

impl SerializeOptions {
    /// Wrap the output in an XMP packet header and trailer.
    pub fn packet_wrapper(mut self) -> Self {
        self.wrap_packet = true;
        self
    }

    /// Add padding so the packet can later be edited in place.
    ///
    /// Only written when the packet wrapper is enabled.
    pub fn padding(mut self, bytes: usize) -> Self {
        self.padding = bytes;
        self
    }

    /// Mark the packet as read-only in its trailer.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Indent nested elements by `width` spaces.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Write everything without added whitespace.
    pub fn compact(mut self) -> Self {
        self.indent = None;
        self
    }
}

/// Element writer handed to namespace models and value containers
///
/// Names are given as namespace URI plus local name; the emitter maps the
/// URI to the prefix declared on the envelope.
pub struct Emitter<'a> {
    writer: &'a mut Writer<Cursor<Vec<u8>>>,
    prefixes: &'a NamespaceMap,
}

impl<'a> Emitter<'a> {
    fn new(writer: &'a mut Writer<Cursor<Vec<u8>>>, prefixes: &'a NamespaceMap) -> Self {
        Self { writer, prefixes }
    }

    fn qualified(&self, namespace: &str, local: &str) -> XmpResult<String> {
        if namespace.is_empty() {
            return Ok(local.to_string());
        }
        let prefix = self.prefixes.get_prefix(namespace).ok_or_else(|| {
            XmpError::SerializationError(format!("Undeclared namespace: {}", namespace))
        })?;
        Ok(format!("{}:{}", prefix, local))
    }

    /// Open an element
    pub fn start(&mut self, namespace: &str, local: &str, attributes: &[Attribute]) -> XmpResult<()> {
        let name = self.qualified(namespace, local)?;
        let mut elem_start = BytesStart::new(name);
        for attr in attributes {
            let attr_name = self.qualified(&attr.name.namespace, &attr.name.local)?;
            elem_start.push_attribute((attr_name.as_str(), attr.value.as_str()));
        }
        self.writer.write_event(Event::Start(elem_start))?;
        Ok(())
    }

    /// Close an element
    pub fn end(&mut self, namespace: &str, local: &str) -> XmpResult<()> {
        let name = self.qualified(namespace, local)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write character data
    pub fn text(&mut self, text: &str) -> XmpResult<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Replay a captured token
    pub fn token(&mut self, token: &Token) -> XmpResult<()> {
        match token {
            Token::Start { name, attributes } => self.start(&name.namespace, &name.local, attributes),
            Token::End { name } => self.end(&name.namespace, &name.local),
            Token::Text(text) => self.text(text),
            Token::Comment(text) => {
                self.writer
                    .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
                Ok(())
            }
        }
    }

    /// Write a property element around `tokens`, byte for byte.
    ///
    /// The content is written without indentation so that decoding the
    /// output yields the same tokens, whitespace included.
    pub fn verbatim(&mut self, namespace: &str, local: &str, tokens: &[Token]) -> XmpResult<()> {
        let mut inner = Writer::new(Cursor::new(Vec::new()));
        let mut compact = Emitter::new(&mut inner, self.prefixes);
        compact.start(namespace, local, &[])?;
        for token in tokens {
            compact.token(token)?;
        }
        compact.end(namespace, local)?;

        let bytes = inner.into_inner().into_inner();
        self.writer.write_indent()?;
        self.writer.get_mut().write_all(&bytes)?;
        Ok(())
    }

    /// Write `value` wrapped in a property element, unless it is empty.
    pub fn property<V: PropertyValue>(&mut self, namespace: &str, local: &str, value: &V) -> XmpResult<()> {
        if value.is_zero() {
            return Ok(());
        }
        self.start(namespace, local, &[])?;
        value.encode(self)?;
        self.end(namespace, local)
    }
}

/// Serializer for XMP Packets
pub struct XmpSerializer<'r> {
    registry: &'r ModelRegistry,
    options: SerializeOptions,
}

impl XmpSerializer<'static> {
    /// Create a serializer using the default registry for prefixes
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }
}

impl Default for XmpSerializer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> XmpSerializer<'r> {
    /// Create a serializer that takes conventional prefixes from `registry`
    pub fn with_registry(registry: &'r ModelRegistry) -> Self {
        Self {
            registry,
            options: SerializeOptions::default(),
        }
    }

    /// Replace the output options
    pub fn with_options(mut self, options: SerializeOptions) -> Self {
        self.options = options;
        self
    }

    /// Serialize a packet to a string
    pub fn serialize(&self, packet: &Packet) -> XmpResult<String> {
        let rdf = self.serialize_rdf(packet)?;
        if !self.options.wrap_packet {
            return Ok(rdf);
        }

        let mut out = String::with_capacity(rdf.len() + self.options.padding + 128);
        out.push_str(&format!(
            "<?xpacket begin=\"\u{feff}\" id=\"{}\"?>\n",
            PACKET_ID
        ));
        out.push_str(&rdf);
        out.push('\n');
        out.push_str(&padding(self.options.padding));
        let end = if self.options.read_only { 'r' } else { 'w' };
        out.push_str(&format!("<?xpacket end=\"{}\"?>", end));
        Ok(out)
    }

    /// Serialize a packet into `writer`
    pub fn write_to<W: Write>(&self, packet: &Packet, mut writer: W) -> XmpResult<()> {
        let xml = self.serialize(packet)?;
        writer.write_all(xml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn serialize_rdf(&self, packet: &Packet) -> XmpResult<String> {
        let prefixes = self.prefixes(packet);
        let mut writer = match self.options.indent {
            Some(width) => Writer::new_with_indent(Cursor::new(Vec::new()), b' ', width),
            None => Writer::new(Cursor::new(Vec::new())),
        };

        let mut rdf_start = BytesStart::new("rdf:RDF");
        for (prefix, uri) in prefixes.iter() {
            if uri == ns::XML {
                continue;
            }
            rdf_start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
        }
        writer.write_event(Event::Start(rdf_start))?;

        let mut desc_start = BytesStart::new("rdf:Description");
        if let Some(about) = packet.about() {
            desc_start.push_attribute(("rdf:about", about.as_str()));
        }

        if packet.is_empty() {
            writer.write_event(Event::Empty(desc_start))?;
        } else {
            writer.write_event(Event::Start(desc_start))?;
            let mut emitter = Emitter::new(&mut writer, &prefixes);
            for (namespace, model) in packet.models() {
                tracing::trace!(namespace = namespace.as_str(), "encoding namespace model");
                model.encode(&mut emitter)?;
            }
            writer.write_event(Event::End(BytesEnd::new("rdf:Description")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("rdf:RDF")))?;

        let result = writer.into_inner().into_inner();
        String::from_utf8(result)
            .map_err(|e| XmpError::SerializationError(format!("UTF-8 encoding error: {}", e)))
    }

    /// Prefixes for every namespace the packet's models use
    fn prefixes(&self, packet: &Packet) -> NamespaceMap {
        let mut used = BTreeSet::new();
        for model in packet.models().values() {
            model.namespaces(&mut used);
        }

        let mut prefixes = NamespaceMap::new();
        prefixes.bind(ns::RDF, Some("rdf"));
        prefixes.bind(ns::XML, Some("xml"));
        for uri in &used {
            let preferred = self
                .registry
                .prefix(uri)
                .or_else(|| well_known_prefix(uri).map(str::to_string));
            prefixes.bind(uri, preferred.as_deref());
        }
        prefixes
    }
}

fn padding(bytes: usize) -> String {
    let mut out = String::with_capacity(bytes + bytes / 100 + 1);
    let mut remaining = bytes;
    while remaining > 0 {
        let line = remaining.min(100);
        out.push_str(&" ".repeat(line));
        out.push('\n');
        remaining -= line;
    }
    out
}
