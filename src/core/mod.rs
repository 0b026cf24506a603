//! XMP Core module
//!
//! This module contains the core functionality for XMP packet processing:
//! tokenizing, decoding into namespace models, and serialization.

pub mod about;
pub mod error;
pub mod generic;
pub mod model;
pub mod namespace;
pub mod packet;
pub mod parser;
pub mod registry;
pub mod serializer;
pub mod token;

pub use about::ResourceUri;
pub use error::{XmpError, XmpResult};
pub use generic::{GenericModel, RawProperty};
pub use model::{decode_schema, Model, Schema};
pub use namespace::{ns, well_known_prefix, NamespaceMap};
pub use packet::Packet;
pub use parser::XmpParser;
pub use registry::{default_registry, DecodeFn, ModelRegistry, RegistryEntry};
pub use serializer::{Emitter, SerializeOptions, XmpSerializer};
pub use token::{Attribute, QualifiedName, Token, TokenSpan};
