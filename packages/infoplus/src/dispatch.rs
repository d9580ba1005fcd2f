//! Kind dispatcher: classify a document from its root element alone.
//!
//! Only the events up to the root start tag are read; the rest of the
//! document is never parsed.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{InfoPlusError, MalformedXml, Result};
use crate::kind::DocumentKind;
use crate::schema::{infoplus, SchemaRegistry};

/// Determine the kind of a document against the built-in registry.
///
/// # Errors
/// See [`identify_with`].
pub fn identify(bytes: &[u8]) -> Result<DocumentKind> {
    identify_with(infoplus(), bytes)
}

/// Determine the kind of a document against a registry.
///
/// # Errors
/// - `MalformedDocument` if no root element can be read
/// - `UnrecognizedDocument` if the root matches no registered kind
pub fn identify_with(registry: &SchemaRegistry, bytes: &[u8]) -> Result<DocumentKind> {
    let mut reader = NsReader::from_reader(bytes);

    loop {
        match reader.read_resolved_event()? {
            (resolved, Event::Start(start) | Event::Empty(start)) => {
                let local_name = std::str::from_utf8(start.local_name().into_inner())?.to_string();
                let namespace = match resolved {
                    ResolveResult::Bound(Namespace(ns)) => Some(std::str::from_utf8(ns)?.to_string()),
                    _ => None,
                };

                tracing::trace!(root = %local_name, namespace = ?namespace, "read root element");

                return match registry.entry_for_root(namespace.as_deref(), &local_name) {
                    Some(entry) => {
                        tracing::debug!(kind = %entry.kind, "identified document");
                        Ok(entry.kind)
                    }
                    None => Err(InfoPlusError::UnrecognizedDocument {
                        root: local_name,
                        namespace,
                    }),
                };
            }
            (_, Event::DocType(_)) => {
                return Err(InfoPlusError::MalformedDocument(MalformedXml::Structure(
                    "document type declarations are not allowed".to_string(),
                )));
            }
            (_, Event::Text(text)) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(InfoPlusError::MalformedDocument(MalformedXml::Structure(
                    "text before the root element".to_string(),
                )));
            }
            (_, Event::Eof | Event::End(_)) => {
                return Err(InfoPlusError::MalformedDocument(MalformedXml::Structure(
                    "no root element found".to_string(),
                )));
            }
            _ => {}
        }
    }
}
