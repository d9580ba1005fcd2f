//! Schema registry mapping document kinds to their layout.

use std::collections::BTreeMap;

use super::types::FieldSpec;
use crate::config::ENVELOPE_ELEMENT;
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;

/// Layout of one document kind.
#[derive(Debug, Clone)]
pub struct SchemaEntry {
    pub kind: DocumentKind,

    /// Schema contract version tag (e.g. "v5.0.0").
    pub version: String,

    /// Namespace of the message envelope.
    pub message_namespace: String,

    /// Namespace of the product element and everything below it.
    pub data_namespace: String,

    /// Local name of the envelope element.
    pub root_element: String,

    /// Whether child elements must appear in field order.
    pub strict_ordering: bool,

    /// Specification of the product element wrapped by the envelope.
    pub product: FieldSpec,
}

impl SchemaEntry {
    /// Create an entry for a kind with the standard envelope.
    #[must_use]
    pub fn new(
        kind: DocumentKind,
        message_namespace: impl Into<String>,
        data_namespace: impl Into<String>,
        product: FieldSpec,
    ) -> Self {
        Self {
            kind,
            version: kind.schema_version().to_string(),
            message_namespace: message_namespace.into(),
            data_namespace: data_namespace.into(),
            root_element: ENVELOPE_ELEMENT.to_string(),
            strict_ordering: true,
            product,
        }
    }

    /// Set whether element order is enforced on decode.
    #[must_use]
    pub fn with_strict_ordering(mut self, strict: bool) -> Self {
        self.strict_ordering = strict;
        self
    }

    /// Ordered field list of the product element.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        self.product.children()
    }
}

/// Registry of document kinds.
///
/// Built once and read-only afterwards; shared references can be used from
/// any number of threads.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entries: BTreeMap<DocumentKind, SchemaEntry>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the entry for its kind.
    pub fn register(&mut self, entry: SchemaEntry) {
        self.entries.insert(entry.kind, entry);
    }

    /// Get the entry for a kind.
    ///
    /// # Errors
    /// Returns `UnknownKind` if the kind is not registered.
    pub fn entry(&self, kind: DocumentKind) -> Result<&SchemaEntry> {
        self.entries
            .get(&kind)
            .ok_or_else(|| InfoPlusError::UnknownKind(kind.to_string()))
    }

    /// Ordered field specifications of a kind's product element.
    ///
    /// # Errors
    /// Returns `UnknownKind` if the kind is not registered.
    pub fn spec_for(&self, kind: DocumentKind) -> Result<&[FieldSpec]> {
        self.entry(kind).map(SchemaEntry::fields)
    }

    /// Find the entry whose envelope matches a root element.
    #[must_use]
    pub fn entry_for_root(&self, namespace: Option<&str>, local_name: &str) -> Option<&SchemaEntry> {
        self.entries.values().find(|entry| {
            entry.root_element == local_name
                && namespace == Some(entry.message_namespace.as_str())
        })
    }

    /// Registered kinds, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = DocumentKind> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn is_registered(&self, kind: DocumentKind) -> bool {
        self.entries.contains_key(&kind)
    }
}
