//! Error types for the InfoPlus model.
//!
//! Every failure carries the document kind and, where one exists, the field
//! path and the offending raw text. Nothing is defaulted or swallowed.

use thiserror::Error;

use crate::kind::DocumentKind;
use crate::model::Violation;

/// Main error type for the InfoPlus model library.
#[derive(Debug, Error)]
pub enum InfoPlusError {
    /// Document kind name or registry lookup failed.
    #[error("Unknown document kind: '{0}'. Expected one of DVS, DAS, RIT")]
    UnknownKind(String),

    /// Input is not well-formed XML (or not UTF-8).
    #[error("Malformed XML document: {0}")]
    MalformedDocument(#[from] MalformedXml),

    /// Well-formed XML that violates the structural contract of its kind.
    #[error("{kind} document does not match schema at {path}: {reason}")]
    SchemaMismatch {
        kind: DocumentKind,
        path: String,
        reason: String,
    },

    /// Unparsable or ambiguous date, date-time or duration text.
    #[error("Malformed {kind} temporal value '{text}'{}: {reason}", .path.as_ref().map(|p| format!(" at {p}")).unwrap_or_default())]
    MalformedTemporal {
        kind: DocumentKind,
        text: String,
        reason: String,
        path: Option<String>,
    },

    /// Attempted to encode a record that does not pass validation.
    #[error("Cannot encode incomplete {kind} record: {}", summarize(.violations))]
    IncompleteRecord {
        kind: DocumentKind,
        violations: Vec<Violation>,
    },

    /// Root element matches none of the registered kinds.
    #[error("Unrecognized document root <{root}>{}", .namespace.as_ref().map(|ns| format!(" in namespace {ns}")).unwrap_or_default())]
    UnrecognizedDocument {
        root: String,
        namespace: Option<String>,
    },

    /// Writing the XML output failed.
    #[error("XML write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Why a document could not be read as XML. The reader's own error is kept
/// as the source.
#[derive(Debug, Error)]
pub enum MalformedXml {
    #[error("{0}")]
    Parse(#[from] roxmltree::Error),

    #[error("{0}")]
    Read(#[from] quick_xml::Error),

    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Refused before the root element was reached.
    #[error("{0}")]
    Structure(String),
}

impl InfoPlusError {
    /// Attach a field path to a temporal error raised outside document context.
    #[must_use]
    pub fn at_path(self, field_path: impl Into<String>) -> Self {
        match self {
            Self::MalformedTemporal {
                kind, text, reason, ..
            } => Self::MalformedTemporal {
                kind,
                text,
                reason,
                path: Some(field_path.into()),
            },
            other => other,
        }
    }

    /// Field path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { path, .. } => Some(path),
            Self::MalformedTemporal { path, .. } => path.as_deref(),
            Self::IncompleteRecord { violations, .. } => violations.first().map(|v| v.path.as_str()),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for InfoPlusError {
    fn from(err: roxmltree::Error) -> Self {
        Self::MalformedDocument(err.into())
    }
}

impl From<quick_xml::Error> for InfoPlusError {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedDocument(err.into())
    }
}

impl From<std::str::Utf8Error> for InfoPlusError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::MalformedDocument(err.into())
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no violations recorded".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Result type alias for InfoPlus operations.
pub type Result<T> = std::result::Result<T, InfoPlusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_display() {
        let err = InfoPlusError::UnknownKind("TRAIN".to_string());
        assert!(err.to_string().contains("TRAIN"));
        assert!(err.to_string().contains("DVS, DAS, RIT"));
    }

    #[test]
    fn test_malformed_temporal_with_path() {
        let err = InfoPlusError::MalformedTemporal {
            kind: DocumentKind::DvsPush,
            text: "2025-12-21T10:20:00".to_string(),
            reason: "missing UTC offset".to_string(),
            path: None,
        }
        .at_path("/ReisInformatieProductDVS/@TimeStamp");

        assert_eq!(
            err.to_string(),
            "Malformed DVS temporal value '2025-12-21T10:20:00' at /ReisInformatieProductDVS/@TimeStamp: missing UTC offset"
        );
        assert_eq!(err.path(), Some("/ReisInformatieProductDVS/@TimeStamp"));
    }

    #[test]
    fn test_malformed_temporal_without_path() {
        let err = InfoPlusError::MalformedTemporal {
            kind: DocumentKind::RitPush,
            text: "25-12-21".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
            path: None,
        };
        assert_eq!(
            err.to_string(),
            "Malformed RIT temporal value '25-12-21': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_incomplete_record_summary() {
        let err = InfoPlusError::IncompleteRecord {
            kind: DocumentKind::DasPush,
            violations: vec![
                Violation::new("/ReisInformatieProductDAS/@Versie", "missing mandatory field"),
                Violation::new("/ReisInformatieProductDAS/RIPAdministratie", "missing mandatory field"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("@Versie"));
        assert!(message.contains("(and 1 more)"));
    }

    #[test]
    fn test_malformed_document_keeps_source() {
        use std::error::Error as _;

        let parse_error = roxmltree::Document::parse("<a>").unwrap_err();
        let message = parse_error.to_string();
        let err = InfoPlusError::from(parse_error);
        assert_eq!(err.to_string(), format!("Malformed XML document: {message}"));

        let source = err.source().unwrap();
        assert!(matches!(
            source.downcast_ref::<MalformedXml>(),
            Some(MalformedXml::Parse(_))
        ));
        let root = source.source().unwrap();
        assert!(root.downcast_ref::<roxmltree::Error>().is_some());
        assert_eq!(root.to_string(), message);
    }

    #[test]
    fn test_malformed_encoding_display() {
        let utf8_error = std::str::from_utf8(b"\xff").unwrap_err();
        let err = InfoPlusError::from(utf8_error);
        assert!(err.to_string().starts_with("Malformed XML document: input is not valid UTF-8"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unrecognized_document_display() {
        let err = InfoPlusError::UnrecognizedDocument {
            root: "Envelope".to_string(),
            namespace: Some("http://schemas.xmlsoap.org/soap/envelope/".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized document root <Envelope> in namespace http://schemas.xmlsoap.org/soap/envelope/"
        );

        let err = InfoPlusError::UnrecognizedDocument {
            root: "html".to_string(),
            namespace: None,
        };
        assert_eq!(err.to_string(), "Unrecognized document root <html>");
    }
}
