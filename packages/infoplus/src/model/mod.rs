//! Document model: generic records and the decoded document per kind.
//!
//! A [`Record`] maps field names (XML local names, or `value` for the text
//! content of an element that also carries attributes) to a [`Slot`]. Fields
//! declared `Required` or `Optional` hold a single value; repeated groups
//! hold an ordered list. The shape of every record is described by the
//! schema registry, and [`DocumentRecord::validate`] checks it.

mod validate;

use std::collections::BTreeMap;
use std::slice;

use serde::Serialize;

use crate::kind::DocumentKind;
use crate::schema::{infoplus, SchemaRegistry};
use crate::temporal::Temporal;

pub(crate) use validate::check_record;
pub use validate::{ValidationReport, Violation};

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    /// Enumerated code such as `J`, `N` or `Gepland`.
    Code(String),
    Temporal(Temporal),
    Record(Record),
}

impl Value {
    /// Text of a `Text` or `Code` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Code(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_temporal(&self) -> Option<&Temporal> {
        match self {
            Self::Temporal(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Name of the variant, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Code(_) => "code",
            Self::Temporal(_) => "temporal",
            Self::Record(_) => "record",
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<Temporal> for Value {
    fn from(t: Temporal) -> Self {
        Self::Temporal(t)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

/// Storage of one field: a single value or a repeated group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot {
    One(Value),
    Many(Vec<Value>),
}

impl Slot {
    /// All values held by the slot, in document order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            Self::One(value) => slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

/// Generic record: field name to slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Slot>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.fields.get(name)
    }

    /// First value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.all(name).first()
    }

    /// Every value of a field; empty when absent.
    #[must_use]
    pub fn all(&self, name: &str) -> &[Value] {
        self.fields.get(name).map(Slot::values).unwrap_or_default()
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    #[must_use]
    pub fn temporal(&self, name: &str) -> Option<&Temporal> {
        self.get(name).and_then(Value::as_temporal)
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }

    /// Nested records of a (repeated) field, in document order.
    pub fn records<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Record> + 'a {
        self.all(name).iter().filter_map(Value::as_record)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, slot: Slot) {
        self.fields.insert(name.into(), slot);
    }
}

/// Builder for application-constructed records.
///
/// ```
/// use infoplus_model::model::Record;
///
/// let track = Record::builder()
///     .code("InfoStatus", "Gepland")
///     .integer("SpoorNummer", 2)
///     .text("SpoorFase", "b")
///     .build();
/// assert_eq!(track.integer("SpoorNummer"), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single-valued field, replacing any previous value.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(name, Slot::One(value.into()));
        self
    }

    /// Append an entry to a repeated group.
    #[must_use]
    pub fn push(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        let slot = match self.record.fields.remove(&name) {
            Some(Slot::Many(mut values)) => {
                values.push(value);
                Slot::Many(values)
            }
            Some(Slot::One(first)) => Slot::Many(vec![first, value]),
            None => Slot::Many(vec![value]),
        };
        self.record.insert(name, slot);
        self
    }

    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, Value::Text(value.into()))
    }

    #[must_use]
    pub fn integer(self, name: impl Into<String>, value: i64) -> Self {
        self.set(name, Value::Integer(value))
    }

    #[must_use]
    pub fn code(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, Value::Code(value.into()))
    }

    #[must_use]
    pub fn temporal(self, name: impl Into<String>, value: Temporal) -> Self {
        self.set(name, Value::Temporal(value))
    }

    #[must_use]
    pub fn record(self, name: impl Into<String>, value: Record) -> Self {
        self.set(name, Value::Record(value))
    }

    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Header fields shared by every product element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Header<'a> {
    /// `Versie` attribute of the product.
    pub version: Option<&'a str>,
    /// `TimeStamp` attribute of the product.
    pub timestamp: Option<&'a Temporal>,
    /// `RIPAdministratie/ReisInformatieProductID`.
    pub message_id: Option<&'a str>,
    /// `RIPAdministratie/AbonnementId`.
    pub subscription_id: Option<i64>,
}

/// A decoded (or application-built) document of one kind.
///
/// `product` is the record of the product element inside the message
/// envelope, e.g. `ReisInformatieProductDVS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    kind: DocumentKind,
    product: Record,
}

impl DocumentRecord {
    #[must_use]
    pub fn new(kind: DocumentKind, product: Record) -> Self {
        Self { kind, product }
    }

    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    #[must_use]
    pub fn product(&self) -> &Record {
        &self.product
    }

    #[must_use]
    pub fn header(&self) -> Header<'_> {
        let administration = self.product.record("RIPAdministratie");
        Header {
            version: self.product.text("Versie"),
            timestamp: self.product.temporal("TimeStamp"),
            message_id: administration.and_then(|r| r.text("ReisInformatieProductID")),
            subscription_id: administration.and_then(|r| r.integer("AbonnementId")),
        }
    }

    /// The payload element (`DynamischeVertrekStaat`, `DynamischeAankomstStaat`
    /// or `RitInfo`).
    #[must_use]
    pub fn payload(&self) -> Option<&Record> {
        self.product.record(self.kind.payload_element())
    }

    /// Check the record against the built-in InfoPlus registry.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        self.validate_with(infoplus())
    }

    /// Check the record against the layout registered in `registry`.
    #[must_use]
    pub fn validate_with(&self, registry: &SchemaRegistry) -> ValidationReport {
        match registry.entry(self.kind) {
            Ok(entry) => ValidationReport::new(check_record(self.kind, &entry.product, &self.product)),
            Err(err) => ValidationReport::new(vec![Violation::new("/", err.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_accessors() {
        let record = Record::builder()
            .text("StationCode", "UTLN")
            .integer("Type", 1)
            .code("Reserveren", "N")
            .build();

        assert_eq!(record.text("StationCode"), Some("UTLN"));
        assert_eq!(record.integer("Type"), Some(1));
        assert_eq!(record.text("Reserveren"), Some("N"));
        assert_eq!(record.integer("StationCode"), None);
        assert!(record.get("Missing").is_none());
        assert!(record.all("Missing").is_empty());
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["Reserveren", "StationCode", "Type"]);
    }

    #[test]
    fn test_push_builds_list() {
        let record = Record::builder()
            .push("VertrekTijd", Record::builder().code("InfoStatus", "Gepland").build())
            .push("VertrekTijd", Record::builder().code("InfoStatus", "Actueel").build())
            .build();

        let statuses: Vec<_> = record
            .records("VertrekTijd")
            .filter_map(|r| r.text("InfoStatus"))
            .collect();
        assert_eq!(statuses, vec!["Gepland", "Actueel"]);
        assert!(matches!(record.slot("VertrekTijd"), Some(Slot::Many(v)) if v.len() == 2));
    }

    #[test]
    fn test_push_after_set_keeps_both() {
        let record = Record::builder().set("A", 1_i64).push("A", 2_i64).build();
        assert_eq!(record.all("A"), &[Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_header_and_payload() {
        let timestamp = temporal::parse(DocumentKind::DvsPush, "2025-12-21T10:20:00+01:00").unwrap();
        let product = Record::builder()
            .text("Versie", "6.2")
            .temporal("TimeStamp", timestamp)
            .record(
                "RIPAdministratie",
                Record::builder()
                    .text("ReisInformatieProductID", "5355006789623005")
                    .integer("AbonnementId", 54)
                    .build(),
            )
            .record("DynamischeVertrekStaat", Record::builder().integer("RitId", 6789).build())
            .build();
        let document = DocumentRecord::new(DocumentKind::DvsPush, product);

        let header = document.header();
        assert_eq!(header.version, Some("6.2"));
        assert_eq!(header.timestamp, Some(&timestamp));
        assert_eq!(header.message_id, Some("5355006789623005"));
        assert_eq!(header.subscription_id, Some(54));
        assert_eq!(document.payload().and_then(|p| p.integer("RitId")), Some(6789));
    }

    #[test]
    fn test_validate_with_empty_registry() {
        let document = DocumentRecord::new(DocumentKind::RitPush, Record::new());
        let report = document.validate_with(&SchemaRegistry::new());
        assert!(!report.is_valid());
        assert_eq!(report.violations()[0].path, "/");
    }

    #[test]
    fn test_json_projection() {
        let record = Record::builder()
            .integer("SpoorNummer", 2)
            .text("SpoorFase", "b")
            .push("Station", Record::builder().text("StationCode", "HTN").build())
            .build();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "SpoorFase": "b",
                "SpoorNummer": 2,
                "Station": [{ "StationCode": "HTN" }]
            })
        );
    }
}
