//! Typed namespace models
//!
//! Each model here implements [`Schema`](crate::core::model::Schema) and is
//! registered in [`ModelRegistry::with_defaults`](crate::core::registry::ModelRegistry::with_defaults).

pub mod dc;

pub use dc::DublinCore;
