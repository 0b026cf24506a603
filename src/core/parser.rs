//! XMP XML/RDF parser
//!
//! The parser walks the token stream once, counting element depth instead of
//! building a tree. It finds the `rdf:RDF` envelope, the `rdf:Description`
//! directly inside it, and captures each child of the description as a token
//! span. Every span goes to the decoder registered for the property's
//! namespace, or to the generic fallback if there is none.

use crate::core::about::ResourceUri;
use crate::core::error::{XmpError, XmpResult};
use crate::core::generic;
use crate::core::namespace::ns;
use crate::core::packet::Packet;
use crate::core::registry::{default_registry, ModelRegistry};
use crate::core::token::{Attribute, QualifiedName, Token, TokenSpan};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::io::BufRead;

/// Depth of the `rdf:RDF` element itself
const ENVELOPE_DEPTH: usize = 1;

/// Parser for XMP Packets
pub struct XmpParser<'r> {
    registry: &'r ModelRegistry,
}

impl XmpParser<'static> {
    /// Create a parser that uses the default registry
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }
}

impl Default for XmpParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> XmpParser<'r> {
    /// Create a parser that dispatches properties through `registry`
    pub fn with_registry(registry: &'r ModelRegistry) -> Self {
        Self { registry }
    }

    /// Parse an XMP Packet from a string
    pub fn parse_str(&self, xml: &str) -> XmpResult<Packet> {
        self.parse_reader(xml.as_bytes())
    }

    /// Parse an XMP Packet from a buffered reader
    ///
    /// Anything outside the `rdf:RDF` element (an `x:xmpmeta` wrapper,
    /// `<?xpacket?>` instructions) is skipped.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> XmpResult<Packet> {
        let mut reader = NsReader::from_reader(reader);
        reader.config_mut().expand_empty_elements = true;

        let mut state = ParseState::new(self.registry);
        let mut buf = Vec::new();

        loop {
            let (resolved, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| XmpError::ParseError(format!("XML parsing error: {}", e)))?;
            let namespace = namespace_uri(resolved)?;

            match event {
                Event::Start(e) => {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    let attributes = collect_attributes(&reader, &e)?;
                    state.start(QualifiedName::new(namespace, local), attributes)?;
                }
                Event::End(e) => {
                    let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    state.end(QualifiedName::new(namespace, local))?;
                }
                Event::Text(e) => {
                    state.text(&unescape_text(&e)?);
                }
                Event::CData(e) => {
                    state.text(&String::from_utf8_lossy(e.as_ref()));
                }
                Event::GeneralRef(e) => {
                    // Entity and character references arrive separately from the text around them
                    let name = String::from_utf8_lossy(e.as_ref());
                    let reference = format!("&{};", name);
                    let resolved = unescape(&reference).map_err(|err| {
                        XmpError::ParseError(format!("Unknown entity reference {}: {}", reference, err))
                    })?;
                    state.text(&resolved);
                }
                Event::Comment(e) => {
                    state.comment(String::from_utf8_lossy(e.as_ref()).to_string());
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        state.finish()
    }
}

/// Property element being captured
struct OpenProperty {
    depth: usize,
    name: QualifiedName,
    span: TokenSpan,
}

/// Depth-counting state machine
///
/// `depth` is 0 outside the envelope and counts the envelope itself as 1.
/// A description is only recognized directly inside the envelope and a
/// property only directly inside the description.
struct ParseState<'r> {
    registry: &'r ModelRegistry,
    packet: Packet,
    depth: usize,
    description_depth: Option<usize>,
    property: Option<OpenProperty>,
}

impl<'r> ParseState<'r> {
    fn new(registry: &'r ModelRegistry) -> Self {
        Self {
            registry,
            packet: Packet::new(),
            depth: 0,
            description_depth: None,
            property: None,
        }
    }

    fn start(&mut self, name: QualifiedName, attributes: Vec<Attribute>) -> XmpResult<()> {
        if self.depth == 0 {
            if name.is_rdf("RDF") {
                tracing::debug!("entering rdf:RDF envelope");
                self.depth = ENVELOPE_DEPTH;
            }
            return Ok(());
        }
        self.depth += 1;

        if let Some(property) = &mut self.property {
            property.span.push(Token::Start { name, attributes });
            return Ok(());
        }

        match self.description_depth {
            None if self.depth == ENVELOPE_DEPTH + 1 && name.is_rdf("Description") => {
                self.open_description(attributes)
            }
            Some(depth) if self.depth == depth + 1 => {
                self.property = Some(OpenProperty {
                    depth: self.depth,
                    name,
                    span: TokenSpan::new(),
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn end(&mut self, name: QualifiedName) -> XmpResult<()> {
        if self.depth == 0 {
            return Ok(());
        }

        if let Some(property) = self.property.take() {
            if property.depth == self.depth {
                self.dispatch(property.name, property.span)?;
            } else {
                let mut property = property;
                property.span.push(Token::End { name });
                self.property = Some(property);
            }
        } else if self.description_depth == Some(self.depth) {
            self.description_depth = None;
        }

        self.depth -= 1;
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(property) = &mut self.property {
            property.span.push(Token::Text(text.to_string()));
        }
    }

    fn comment(&mut self, text: String) {
        if let Some(property) = &mut self.property {
            property.span.push(Token::Comment(text));
        }
    }

    fn finish(self) -> XmpResult<Packet> {
        if let Some(property) = &self.property {
            return Err(XmpError::ParseError(format!(
                "Unexpected end of input inside property {}{}",
                property.name.namespace, property.name.local
            )));
        }
        if self.description_depth.is_some() {
            return Err(XmpError::ParseError(
                "Unexpected end of input inside rdf:Description".to_string(),
            ));
        }
        if self.depth > 0 {
            return Err(XmpError::ParseError(
                "Unexpected end of input inside rdf:RDF".to_string(),
            ));
        }
        Ok(self.packet)
    }

    fn open_description(&mut self, attributes: Vec<Attribute>) -> XmpResult<()> {
        self.description_depth = Some(self.depth);

        let mut properties = Vec::new();
        for attr in attributes {
            if attr.name.is_rdf("about") {
                self.record_about(&attr.value)?;
            } else if is_property_attribute(&attr.name) {
                properties.push(attr);
            }
        }

        // Attribute form: dc:coverage="Global" is shorthand for a simple text property
        for attr in properties {
            let span = TokenSpan::from(vec![Token::Text(attr.value)]);
            self.dispatch(attr.name, span)?;
        }
        Ok(())
    }

    fn record_about(&mut self, value: &str) -> XmpResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        let about = ResourceUri::parse(value).map_err(|source| XmpError::BadAbout {
            value: value.to_string(),
            source,
        })?;

        match self.packet.about() {
            None => {
                tracing::debug!(about = about.as_str(), "recorded resource identifier");
                self.packet.set_about(Some(about));
            }
            Some(existing) if *existing == about => {
                tracing::debug!(about = about.as_str(), "redundant rdf:Description");
            }
            Some(existing) => {
                return Err(XmpError::InconsistentAbout {
                    first: existing.to_string(),
                    second: about.to_string(),
                });
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, name: QualifiedName, span: TokenSpan) -> XmpResult<()> {
        let QualifiedName { namespace, local } = name;
        let existing = self.packet.remove_model(&namespace);
        tracing::trace!(
            namespace = namespace.as_str(),
            property = local.as_str(),
            tokens = span.len(),
            "captured property span"
        );

        let model = match self.registry.lookup(&namespace) {
            Some(decode) => {
                tracing::debug!(namespace = namespace.as_str(), property = local.as_str(), "decoding property");
                decode(existing, &local, span)
            }
            None => {
                tracing::debug!(
                    namespace = namespace.as_str(),
                    property = local.as_str(),
                    "no registered model, keeping property as generic"
                );
                generic::decode(existing, &namespace, &local, span)
            }
        }
        .map_err(|e| e.in_property(&namespace, &local))?;

        self.packet.insert_model(&namespace, model);
        Ok(())
    }
}

/// Attributes on `rdf:Description` that carry property values
fn is_property_attribute(name: &QualifiedName) -> bool {
    !name.namespace.is_empty() && name.namespace != ns::RDF && name.namespace != ns::XML
}

fn namespace_uri(resolved: ResolveResult<'_>) -> XmpResult<String> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(String::from_utf8_lossy(namespace.as_ref()).to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(XmpError::ParseError(format!(
            "Undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn unescape_text(e: &quick_xml::events::BytesText<'_>) -> XmpResult<String> {
    let raw_text = String::from_utf8_lossy(e.as_ref());
    unescape(&raw_text)
        .map(|text| text.to_string())
        .map_err(|err| XmpError::ParseError(format!("Invalid character data: {}", err)))
}

/// Collect attributes with resolved names, dropping namespace declarations
fn collect_attributes<R>(reader: &NsReader<R>, e: &BytesStart<'_>) -> XmpResult<Vec<Attribute>> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmpError::ParseError(format!("Malformed attribute: {}", err)))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }

        let name = match key.strip_prefix(b"xml:") {
            // The xml prefix is bound implicitly and never declared
            Some(local) => QualifiedName::new(ns::XML, String::from_utf8_lossy(local)),
            None => {
                let (resolved, local) = reader.resolve_attribute(attr.key);
                let namespace = namespace_uri(resolved)?;
                QualifiedName::new(namespace, String::from_utf8_lossy(local.as_ref()))
            }
        };

        let raw_value = String::from_utf8_lossy(attr.value.as_ref());
        let value = unescape(&raw_value)
            .map_err(|err| XmpError::ParseError(format!("Invalid attribute value: {}", err)))?;
        out.push(Attribute::new(name, value.to_string()));
    }
    Ok(out)
}
