//! # xmpmodel
//!
//! Streaming decoder and encoder for XMP packets, with strongly typed
//! per-namespace models.
//!
//! A packet is read as a flat stream of XML tokens. Each property element
//! inside `rdf:Description` is captured as a [`TokenSpan`] and handed to the
//! model registered for its namespace in a [`ModelRegistry`]. Namespaces
//! without a registered model are kept verbatim in a [`GenericModel`] and
//! written back unchanged.
//!
//! ## Reading
//!
//! ```rust
//! use xmpmodel::{DublinCore, Packet};
//!
//! let xml = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
//!   <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!            xmlns:dc="http://purl.org/dc/elements/1.1/">
//!     <rdf:Description rdf:about="">
//!       <dc:creator>
//!         <rdf:Seq>
//!           <rdf:li>Alice</rdf:li>
//!           <rdf:li>Bob</rdf:li>
//!         </rdf:Seq>
//!       </dc:creator>
//!     </rdf:Description>
//!   </rdf:RDF>
//! </x:xmpmeta>"#;
//!
//! let packet: Packet = xml.parse()?;
//! let dc = packet.get::<DublinCore>().unwrap();
//! assert_eq!(dc.creator.len(), 2);
//! assert_eq!(dc.creator[0].as_str(), "Alice");
//! # Ok::<(), xmpmodel::XmpError>(())
//! ```
//!
//! ## Writing
//!
//! ```rust
//! use xmpmodel::{DublinCore, LangAlt, Packet, SerializeOptions};
//!
//! let mut packet = Packet::new();
//! packet.insert(DublinCore {
//!     title: LangAlt::with_default("Sunset"),
//!     ..Default::default()
//! });
//!
//! let mut out = Vec::new();
//! packet.write_with(
//!     &mut out,
//!     xmpmodel::default_registry(),
//!     SerializeOptions::default().packet_wrapper(),
//! )?;
//! let xml = String::from_utf8(out).unwrap();
//! assert!(xml.contains("<dc:title>"));
//! # Ok::<(), xmpmodel::XmpError>(())
//! ```

pub mod core;
pub mod schemas;
pub mod types;

pub use crate::core::{
    default_registry, ns, Attribute, DecodeFn, Emitter, GenericModel, Model, ModelRegistry, Packet,
    QualifiedName, RawProperty, ResourceUri, Schema, SerializeOptions, Token, TokenSpan, XmpError,
    XmpParser, XmpResult, XmpSerializer,
};
pub use schemas::DublinCore;
pub use types::{
    Date, LangAlt, OrderedArray, PropertyValue, ProperName, Scalar, Text, Time, TimeZone,
    UnorderedArray,
};
