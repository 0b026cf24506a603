//! Namespace model registry
//!
//! Maps a namespace URI to the function that decodes its properties. The
//! registry is an ordinary value: build one, register the models you need,
//! and hand it to the parser. [`default_registry`] provides a shared
//! instance with every built-in model registered.

use crate::core::error::{XmpError, XmpResult};
use crate::core::model::{decode_schema, Model, Schema};
use crate::core::token::TokenSpan;
use crate::schemas::DublinCore;
use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

static DEFAULT_REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();

/// Decode function: `(existing model, local property name, span) -> updated model`
pub type DecodeFn = fn(Option<Box<dyn Model>>, &str, TokenSpan) -> XmpResult<Box<dyn Model>>;

/// Registered decoder for one namespace
#[derive(Clone)]
pub struct RegistryEntry {
    /// Conventional prefix, only used for output readability
    pub prefix: String,
    /// Decode function
    pub decode: DecodeFn,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Registry of namespace decoders
///
/// Lookups take a shared lock, so a registry can be shared between threads
/// and still accept late registrations.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    entries: RwLock<HashMap<String, RegistryEntry>>,
}

impl ModelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in models registered
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_schema::<DublinCore>();
        registry
    }

    /// Register a decode function for `namespace`
    ///
    /// A later registration for the same URI replaces the earlier one.
    pub fn register(&self, namespace: &str, prefix: &str, decode: DecodeFn) -> XmpResult<()> {
        if namespace.is_empty() {
            return Err(XmpError::BadParam("URI cannot be empty".to_string()));
        }
        if prefix.is_empty() {
            return Err(XmpError::BadParam("Prefix cannot be empty".to_string()));
        }

        self.insert_entry(namespace, prefix, decode);
        Ok(())
    }

    /// Register a typed model under its own namespace and prefix
    pub fn register_schema<M: Schema>(&self) {
        self.insert_entry(M::NAMESPACE, M::PREFIX, decode_schema::<M>);
    }

    fn insert_entry(&self, namespace: &str, prefix: &str, decode: DecodeFn) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let previous = entries.insert(
            namespace.to_string(),
            RegistryEntry {
                prefix: prefix.to_string(),
                decode,
            },
        );
        if previous.is_some() {
            tracing::debug!(namespace, prefix, "replaced namespace decoder");
        }
    }

    /// Look up the decode function for `namespace`
    pub fn lookup(&self, namespace: &str) -> Option<DecodeFn> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(namespace).map(|entry| entry.decode)
    }

    /// Conventional prefix registered for `namespace`
    pub fn prefix(&self, namespace: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(namespace).map(|entry| entry.prefix.clone())
    }

    /// Check if a decoder is registered for `namespace`
    pub fn contains(&self, namespace: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(namespace)
    }

    /// All registered namespace URIs, sorted
    pub fn namespaces(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut uris: Vec<String> = entries.keys().cloned().collect();
        uris.sort();
        uris
    }
}

/// Shared registry with every built-in model registered
pub fn default_registry() -> &'static ModelRegistry {
    DEFAULT_REGISTRY.get_or_init(ModelRegistry::with_defaults)
}
