//! InfoPlus model - Typed XML binding for the NS/NDOV push export messages.
//!
//! This crate reads and writes the three InfoPlus push export feeds:
//!
//! - **DVS** (Dynamische VertrekStaat, schema v5.0.0): departure board per station
//! - **DAS** (Dynamische AankomstStaat, schema v1.0.0): arrival board per station
//! - **RIT** (RitInfo, schema v5): complete ride with all stops
//!
//! # Example
//!
//! ```
//! use infoplus_model::{identify, DocumentKind};
//!
//! let xml = br#"<PutReisInformatieBoodschapIn xmlns="urn:ns:cdm:reisinformatie:message:ritinfo:5"/>"#;
//! assert_eq!(identify(xml).unwrap(), DocumentKind::RitPush);
//! ```
//!
//! # Architecture
//!
//! - [`kind`]: The supported document kinds
//! - [`schema`]: Schema registry with the field layout of every kind
//! - [`temporal`]: Date, date-time and duration normalization
//! - [`model`]: Generic records, decoded documents and validation
//! - [`codec`]: XML decoding and encoding
//! - [`dispatch`]: Kind identification from the root element
//! - [`views`]: Typed read-only projections per kind
//! - [`config`]: Namespaces and codec options
//! - [`error`]: Error types and Result alias
//! - [`path`]: Field paths used in errors
//! - [`xml`]: XML utilities

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod kind;
pub mod model;
pub mod path;
pub mod schema;
pub mod temporal;
pub mod views;
pub mod xml;

pub use codec::Codec;
pub use config::{CodecConfig, UnknownElementPolicy};
pub use dispatch::identify;
pub use error::{InfoPlusError, MalformedXml, Result};
pub use kind::DocumentKind;
pub use model::{DocumentRecord, Record, RecordBuilder, ValidationReport, Value, Violation};
pub use schema::{infoplus, SchemaRegistry};
pub use temporal::{Temporal, TemporalFormat};
pub use views::{ArrivalBoard, DepartureBoard, RideInfo};

/// Decode a document of a known kind with the default codec.
///
/// # Errors
/// See [`Codec::decode`].
pub fn decode(kind: DocumentKind, bytes: &[u8]) -> Result<DocumentRecord> {
    Codec::new().decode(kind, bytes)
}

/// Identify and decode a document with the default codec.
///
/// # Errors
/// See [`Codec::decode_any`].
pub fn decode_any(bytes: &[u8]) -> Result<DocumentRecord> {
    Codec::new().decode_any(bytes)
}

/// Encode a record with the default codec.
///
/// # Errors
/// See [`Codec::encode`].
pub fn encode(record: &DocumentRecord) -> Result<Vec<u8>> {
    Codec::new().encode(record)
}

/// Parse a DVS message into a [`DepartureBoard`].
///
/// # Errors
/// Any decoding error of [`decode`].
pub fn parse_dvs(bytes: &[u8]) -> Result<DepartureBoard> {
    DepartureBoard::try_from(&decode(DocumentKind::DvsPush, bytes)?)
}

/// Parse a DAS message into an [`ArrivalBoard`].
///
/// # Errors
/// Any decoding error of [`decode`].
pub fn parse_das(bytes: &[u8]) -> Result<ArrivalBoard> {
    ArrivalBoard::try_from(&decode(DocumentKind::DasPush, bytes)?)
}

/// Parse a RIT message into a [`RideInfo`].
///
/// # Errors
/// Any decoding error of [`decode`].
pub fn parse_rit(bytes: &[u8]) -> Result<RideInfo> {
    RideInfo::try_from(&decode(DocumentKind::RitPush, bytes)?)
}
