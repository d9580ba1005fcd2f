//! Codec: bidirectional transform between XML bytes and [`DocumentRecord`]s.
//!
//! Decoding is driven entirely by the schema registry. A document either
//! decodes into a record that passes validation, or fails with the first
//! problem found and its field path; partial records are never returned.
//! Encoding validates first and writes elements in field order, the envelope
//! in the message namespace and the product in the `ns2`-prefixed data
//! namespace.

mod decode;
mod encode;

use crate::config::CodecConfig;
use crate::dispatch;
use crate::error::Result;
use crate::kind::DocumentKind;
use crate::model::{DocumentRecord, ValidationReport};
use crate::schema::{infoplus, SchemaRegistry};

/// Decoder/encoder bound to a schema registry and options.
///
/// Holds only shared references and plain options, so one codec can be used
/// from any number of threads at once.
#[derive(Debug, Clone)]
pub struct Codec<'r> {
    registry: &'r SchemaRegistry,
    config: CodecConfig,
}

impl Codec<'static> {
    /// Codec over the built-in InfoPlus registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(infoplus())
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Codec<'r> {
    #[must_use]
    pub fn with_registry(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Determine the kind of a document from its root element.
    ///
    /// # Errors
    /// See [`dispatch::identify_with`].
    pub fn identify(&self, bytes: &[u8]) -> Result<DocumentKind> {
        dispatch::identify_with(self.registry, bytes)
    }

    /// Decode a document of a known kind.
    ///
    /// # Errors
    /// - `UnknownKind` if the kind is not registered
    /// - `MalformedDocument` for non-UTF-8 or non-well-formed input
    /// - `SchemaMismatch` for structural violations, with the field path
    /// - `MalformedTemporal` for bad date, date-time or duration text
    pub fn decode(&self, kind: DocumentKind, bytes: &[u8]) -> Result<DocumentRecord> {
        let entry = self.registry.entry(kind)?;
        decode::decode_document(entry, &self.config, bytes)
    }

    /// Identify the kind of a document, then decode it.
    ///
    /// # Errors
    /// Any error of [`Codec::identify`] or [`Codec::decode`].
    pub fn decode_any(&self, bytes: &[u8]) -> Result<DocumentRecord> {
        let kind = self.identify(bytes)?;
        self.decode(kind, bytes)
    }

    /// Encode a record as a complete message.
    ///
    /// # Errors
    /// - `UnknownKind` if the record's kind is not registered
    /// - `IncompleteRecord` if the record does not pass validation
    pub fn encode(&self, record: &DocumentRecord) -> Result<Vec<u8>> {
        let entry = self.registry.entry(record.kind())?;
        encode::encode_document(entry, &self.config, record)
    }

    /// Validate a record against this codec's registry.
    #[must_use]
    pub fn validate(&self, record: &DocumentRecord) -> ValidationReport {
        record.validate_with(self.registry)
    }
}
