//! Record validation against a kind's field specifications.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::CONTENT_FIELD;
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::path::FieldPath;
use crate::schema::{Constraint, FieldSpec, FieldType, NodeKind, Occurs};
use crate::temporal;
use crate::xml::is_xml_char;

use super::{Record, Slot, Value};

/// One failed check, located by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of [`DocumentRecord::validate`](super::DocumentRecord::validate).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Turn a failed report into an `IncompleteRecord` error.
    ///
    /// # Errors
    /// Returns `IncompleteRecord` listing every violation when the report is
    /// not valid.
    pub fn into_result(self, kind: DocumentKind) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InfoPlusError::IncompleteRecord {
                kind,
                violations: self.violations,
            })
        }
    }
}

/// Check a product record against its specification.
pub(crate) fn check_record(kind: DocumentKind, spec: &FieldSpec, record: &Record) -> Vec<Violation> {
    let mut validator = Validator {
        kind,
        violations: Vec::new(),
    };
    validator.record(spec, record, &FieldPath::root(&spec.name));
    validator.violations
}

struct Validator {
    kind: DocumentKind,
    violations: Vec<Violation>,
}

impl Validator {
    fn report(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.violations.push(Violation::new(path.to_string(), message));
    }

    fn record(&mut self, spec: &FieldSpec, record: &Record, path: &FieldPath) {
        for name in record.field_names() {
            if spec.child(name).is_none() {
                self.report(&path.child(name), format!("unknown field for <{}>", spec.name));
            }
        }

        for field in spec.children() {
            self.field(field, record.slot(&field.name), path);
        }

        for constraint in &spec.constraints {
            match constraint {
                Constraint::DistinctBy { group, attribute } => {
                    self.distinct_by(record, group, attribute, path);
                }
                Constraint::NotBefore {
                    earlier,
                    later,
                    paired_by,
                } => self.not_before(record, earlier, later, paired_by, path),
            }
        }
    }

    fn field(&mut self, field: &FieldSpec, slot: Option<&Slot>, parent: &FieldPath) {
        match (field.occurs, slot) {
            (_, None) => {
                if field.is_mandatory() {
                    self.report(&field_path(field, parent, None), "missing mandatory field");
                }
            }
            (Occurs::Required | Occurs::Optional, Some(Slot::One(value))) => {
                self.value(field, value, &field_path(field, parent, None));
            }
            (Occurs::Repeated { min, max }, Some(Slot::Many(values))) => {
                let path = field_path(field, parent, None);
                if values.is_empty() {
                    self.report(&path, "empty entry list; omit the field instead");
                } else if values.len() < min {
                    self.report(
                        &path,
                        format!("expected at least {min} entries, found {}", values.len()),
                    );
                }
                if let Some(max) = max.filter(|max| values.len() > *max) {
                    self.report(
                        &path,
                        format!("expected at most {max} entries, found {}", values.len()),
                    );
                }
                for (i, value) in values.iter().enumerate() {
                    self.value(field, value, &field_path(field, parent, Some(i + 1)));
                }
            }
            (Occurs::Repeated { .. }, Some(Slot::One(_))) => {
                self.report(&field_path(field, parent, None), "expected a list of entries");
            }
            (_, Some(Slot::Many(_))) => {
                self.report(&field_path(field, parent, None), "expected a single value");
            }
        }
    }

    fn value(&mut self, field: &FieldSpec, value: &Value, path: &FieldPath) {
        match (&field.field_type, value) {
            (FieldType::Text, Value::Text(text)) => {
                if let Some(c) = text.chars().find(|c| !is_xml_char(*c)) {
                    self.report(
                        path,
                        format!("character U+{:04X} is not allowed in XML", u32::from(c)),
                    );
                }
            }
            (FieldType::Integer, Value::Integer(_)) => {}
            (FieldType::Code(allowed), Value::Code(code)) => {
                if !allowed.contains(code) {
                    self.report(
                        path,
                        format!("code '{code}' is not {}", field.field_type.describe()),
                    );
                }
            }
            (FieldType::Temporal(format), Value::Temporal(t)) => {
                if t.format() != *format {
                    self.report(path, format!("expected {format}, found {}", t.format()));
                } else if let Err(InfoPlusError::MalformedTemporal { reason, .. }) =
                    temporal::format(self.kind, t)
                {
                    self.report(path, reason);
                }
            }
            (FieldType::Record(_), Value::Record(nested)) => self.record(field, nested, path),
            (expected, found) => self.report(
                path,
                format!("expected {}, found {}", expected.describe(), found.type_name()),
            ),
        }
    }

    fn distinct_by(&mut self, record: &Record, group: &str, attribute: &str, path: &FieldPath) {
        let mut seen = HashSet::new();
        for (i, entry) in record.records(group).enumerate() {
            if let Some(status) = entry.text(attribute) {
                if !seen.insert(status) {
                    self.report(
                        &path.indexed(group, i + 1).attribute(attribute),
                        format!("duplicate {attribute} '{status}' in {group}"),
                    );
                }
            }
        }
    }

    fn not_before(
        &mut self,
        record: &Record,
        earlier: &str,
        later: &str,
        paired_by: &str,
        path: &FieldPath,
    ) {
        for (i, entry) in record.records(later).enumerate() {
            let Some(status) = entry.text(paired_by) else {
                continue;
            };
            let Some(later_time) = entry.temporal(CONTENT_FIELD).and_then(|t| t.as_datetime())
            else {
                continue;
            };
            let earlier_time = record
                .records(earlier)
                .filter(|e| e.text(paired_by) == Some(status))
                .find_map(|e| e.temporal(CONTENT_FIELD).and_then(|t| t.as_datetime()));

            if let Some(earlier_time) = earlier_time.filter(|t| later_time < *t) {
                self.report(
                    &path.indexed(later, i + 1),
                    format!(
                        "{later} {} precedes {earlier} {} ({paired_by} '{status}')",
                        later_time.to_rfc3339(),
                        earlier_time.to_rfc3339()
                    ),
                );
            }
        }
    }
}

fn field_path(field: &FieldSpec, parent: &FieldPath, index: Option<usize>) -> FieldPath {
    match (field.node, index) {
        (NodeKind::Attribute, _) => parent.attribute(&field.name),
        (NodeKind::Content, _) => parent.content(),
        (NodeKind::Element, Some(i)) => parent.indexed(&field.name, i),
        (NodeKind::Element, None) => parent.child(&field.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentRecord;
    use crate::schema::infoplus;
    use pretty_assertions::assert_eq;

    fn status_time(kind: DocumentKind, status: &str, raw: &str) -> Record {
        Record::builder()
            .code("InfoStatus", status)
            .temporal("value", temporal::parse(kind, raw).unwrap())
            .build()
    }

    fn station(code: &str) -> Record {
        Record::builder().text("StationCode", code).build()
    }

    fn rit_stop(arrival: &str, departure: &str) -> Record {
        let kind = DocumentKind::RitPush;
        Record::builder()
            .record("Station", station("MT"))
            .push("AankomstTijd", status_time(kind, "Gepland", arrival))
            .push("VertrekTijd", status_time(kind, "Gepland", departure))
            .build()
    }

    fn rit_document(stop: Record) -> DocumentRecord {
        let kind = DocumentKind::RitPush;
        let product = Record::builder()
            .text("Versie", "9.2")
            .temporal(
                "TimeStamp",
                temporal::parse(kind, "2025-12-25T08:00:00Z").unwrap(),
            )
            .record(
                "RIPAdministratie",
                Record::builder()
                    .text("ReisInformatieProductID", "53590029920001")
                    .integer("AbonnementId", 57)
                    .build(),
            )
            .record(
                "RitInfo",
                Record::builder()
                    .integer("TreinNummer", 2992)
                    .temporal("TreinDatum", temporal::parse(kind, "2025-12-25").unwrap())
                    .record(
                        "TreinSoort",
                        Record::builder()
                            .text("Code", "IC")
                            .text("value", "Intercity")
                            .build(),
                    )
                    .text("Vervoerder", "NS")
                    .push(
                        "LogischeRit",
                        Record::builder()
                            .text("LogischeRitNummer", "2992")
                            .push(
                                "LogischeRitDeel",
                                Record::builder()
                                    .integer("LogischeRitDeelNummer", 2992)
                                    .push("LogischeRitDeelStation", stop)
                                    .build(),
                            )
                            .build(),
                    )
                    .build(),
            )
            .build();
        DocumentRecord::new(kind, product)
    }

    const STOP_PATH: &str =
        "/ReisInformatieProductRitInfo/RitInfo/LogischeRit[1]/LogischeRitDeel[1]/LogischeRitDeelStation[1]";

    #[test]
    fn test_valid_rit_record() {
        let document = rit_document(rit_stop("2025-12-25T10:00:00+01:00", "2025-12-25T10:02:00+01:00"));
        let report = document.validate();
        assert!(report.is_valid(), "{:?}", report.violations());
        assert!(report.into_result(DocumentKind::RitPush).is_ok());
    }

    #[test]
    fn test_departure_before_arrival() {
        let document = rit_document(rit_stop("2025-12-25T10:02:00+01:00", "2025-12-25T10:00:00+01:00"));
        let report = document.validate();
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.violations()[0].path, format!("{STOP_PATH}/VertrekTijd[1]"));
        assert!(report.violations()[0].message.contains("precedes AankomstTijd"));
    }

    #[test]
    fn test_departure_compared_across_offsets() {
        // 09:01Z is after 10:00+01:00
        let document = rit_document(rit_stop("2025-12-25T10:00:00+01:00", "2025-12-25T09:01:00Z"));
        assert!(document.validate().is_valid());
    }

    #[test]
    fn test_duplicate_status() {
        let kind = DocumentKind::RitPush;
        let stop = Record::builder()
            .record("Station", station("MT"))
            .push("AankomstTijd", status_time(kind, "Gepland", "2025-12-25T10:00:00Z"))
            .push("AankomstTijd", status_time(kind, "Gepland", "2025-12-25T10:01:00Z"))
            .build();
        let report = rit_document(stop).validate();
        assert_eq!(
            report.violations(),
            &[Violation::new(
                format!("{STOP_PATH}/AankomstTijd[2]/@InfoStatus"),
                "duplicate InfoStatus 'Gepland' in AankomstTijd",
            )]
        );
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let stop = Record::builder().text("Perron", "3").build();
        let report = rit_document(stop).validate();
        let paths: Vec<_> = report.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![format!("{STOP_PATH}/Perron"), format!("{STOP_PATH}/Station")]
        );
        assert_eq!(report.violations()[1].message, "missing mandatory field");
    }

    #[test]
    fn test_wrong_value_types() {
        let stop = Record::builder()
            .record("Station", station("MT"))
            .text("StationToegankelijk", "J")
            .set("Stopt", Record::new())
            .build();
        let report = rit_document(stop).validate();
        let messages: Vec<_> = report.violations().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                format!("{STOP_PATH}/StationToegankelijk: expected one of J, N, found text"),
                format!("{STOP_PATH}/Stopt: expected a list of entries"),
            ]
        );
    }

    #[test]
    fn test_text_outside_xml_char_range() {
        let stop = Record::builder()
            .record("Station", station("M\u{1}T"))
            .build();
        let report = rit_document(stop).validate();
        assert_eq!(
            report.violations().to_vec(),
            vec![Violation::new(
                format!("{STOP_PATH}/Station/StationCode"),
                "character U+0001 is not allowed in XML"
            )]
        );

        let stop = Record::builder().record("Station", station("M\tT\r\n")).build();
        assert!(rit_document(stop).validate().is_valid());
    }

    #[test]
    fn test_invalid_code() {
        let stop = Record::builder()
            .record("Station", station("MT"))
            .code("StationToegankelijk", "X")
            .build();
        let report = rit_document(stop).validate();
        assert_eq!(
            report.violations()[0].message,
            "code 'X' is not one of J, N"
        );
    }

    #[test]
    fn test_cardinality_bounds() {
        let kind = DocumentKind::RitPush;
        let stop = Record::builder()
            .record("Station", station("MT"))
            .push("AankomstTijd", status_time(kind, "Gepland", "2025-12-25T10:00:00Z"))
            .push("AankomstTijd", status_time(kind, "Actueel", "2025-12-25T10:01:00Z"))
            .push("AankomstTijd", status_time(kind, "Actueel", "2025-12-25T10:02:00Z"))
            .build();
        let report = rit_document(stop).validate();
        assert_eq!(
            report.violations()[0],
            Violation::new(
                format!("{STOP_PATH}/AankomstTijd"),
                "expected at most 2 entries, found 3"
            )
        );
    }

    #[test]
    fn test_temporal_format_mismatch() {
        let kind = DocumentKind::RitPush;
        let stop = Record::builder()
            .record("Station", station("MT"))
            .push(
                "VertrekTijd",
                Record::builder()
                    .code("InfoStatus", "Gepland")
                    .temporal("value", temporal::parse(kind, "2025-12-25").unwrap())
                    .build(),
            )
            .build();
        let report = rit_document(stop).validate();
        assert_eq!(
            report.violations()[0],
            Violation::new(
                format!("{STOP_PATH}/VertrekTijd[1]/text()"),
                "expected date-time, found date"
            )
        );
    }

    #[test]
    fn test_into_result_lists_violations() {
        let document = DocumentRecord::new(DocumentKind::DasPush, Record::new());
        let err = document
            .validate_with(infoplus())
            .into_result(DocumentKind::DasPush)
            .unwrap_err();
        match err {
            InfoPlusError::IncompleteRecord { kind, violations } => {
                assert_eq!(kind, DocumentKind::DasPush);
                let paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
                assert_eq!(
                    paths,
                    vec![
                        "/ReisInformatieProductDAS/@Versie",
                        "/ReisInformatieProductDAS/@TimeStamp",
                        "/ReisInformatieProductDAS/RIPAdministratie",
                        "/ReisInformatieProductDAS/DynamischeAankomstStaat",
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
