//! Building blocks shared by the typed views.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

use crate::config::{CONTENT_FIELD, STATUS_ATTRIBUTE};
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::{DocumentRecord, Record};
use crate::path::FieldPath;

/// Whether a value is the planned or the actual (realtime) one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoStatus {
    Gepland,
    Actueel,
}

impl InfoStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gepland => "Gepland",
            Self::Actueel => "Actueel",
        }
    }
}

impl fmt::Display for InfoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value flagged planned or actual.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusValue<T> {
    pub status: InfoStatus,
    pub value: T,
}

/// The planned entry of a planned/actual group.
#[must_use]
pub fn planned<T>(values: &[StatusValue<T>]) -> Option<&T> {
    with_status(values, InfoStatus::Gepland)
}

/// The actual entry of a planned/actual group.
#[must_use]
pub fn actual<T>(values: &[StatusValue<T>]) -> Option<&T> {
    with_status(values, InfoStatus::Actueel)
}

fn with_status<T>(values: &[StatusValue<T>], status: InfoStatus) -> Option<&T> {
    values
        .iter()
        .find(|entry| entry.status == status)
        .map(|entry| &entry.value)
}

/// Station reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub code: String,
    pub station_type: Option<i64>,
    pub short_name: Option<String>,
    pub middle_name: Option<String>,
    pub long_name: Option<String>,
    pub uic_code: Option<String>,
}

/// Train type, e.g. code `IC` named `Intercity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainType {
    pub code: String,
    pub name: String,
}

/// Platform track with optional phase.
///
/// ```
/// use infoplus_model::views::Track;
///
/// let track = Track { number: 2, phase: Some("b".to_string()) };
/// assert_eq!(track.to_string(), "2b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub number: i64,
    pub phase: Option<String>,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.phase.as_deref().unwrap_or_default())
    }
}

/// Presentation texts (uitingen) for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterances {
    pub language: Option<String>,
    pub lines: Vec<String>,
}

/// Display texts for a value, grouped per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub groups: Vec<Utterances>,
}

impl Presentation {
    /// First line of the first language group.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.groups
            .first()
            .and_then(|group| group.lines.first())
            .map(String::as_str)
    }
}

/// Change notice attached to a train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub change_type: String,
    pub cause_short: Option<String>,
    pub cause_long: Option<String>,
    pub station: Option<Station>,
}

/// Product header shared by all kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductHeader {
    pub version: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message_id: String,
    pub subscription_id: i64,
    pub information_time: Option<DateTime<FixedOffset>>,
}

/// Checked read access to a record, failing with the field path.
pub(crate) struct Fields<'a> {
    kind: DocumentKind,
    record: &'a Record,
    path: FieldPath,
}

impl<'a> Fields<'a> {
    /// Root accessor over a document's product element, after validation.
    pub(crate) fn product(document: &'a DocumentRecord, expected: DocumentKind) -> Result<Self> {
        let kind = document.kind();
        if kind != expected {
            return Err(InfoPlusError::SchemaMismatch {
                kind,
                path: "/".to_string(),
                reason: format!("expected a {expected} document"),
            });
        }
        document.validate().into_result(kind)?;
        Ok(Self {
            kind,
            record: document.product(),
            path: FieldPath::root(kind.product_element()),
        })
    }

    fn missing(&self, path: FieldPath, expected: &str) -> InfoPlusError {
        InfoPlusError::SchemaMismatch {
            kind: self.kind,
            path: path.to_string(),
            reason: format!("expected {expected}"),
        }
    }

    pub(crate) fn text(&self, name: &str) -> Result<String> {
        self.opt_text(name)
            .ok_or_else(|| self.missing(self.path.child(name), "text"))
    }

    pub(crate) fn opt_text(&self, name: &str) -> Option<String> {
        self.record.text(name).map(str::to_string)
    }

    pub(crate) fn integer(&self, name: &str) -> Result<i64> {
        self.record
            .integer(name)
            .ok_or_else(|| self.missing(self.path.child(name), "integer"))
    }

    pub(crate) fn opt_integer(&self, name: &str) -> Option<i64> {
        self.record.integer(name)
    }

    /// `J`/`N` indicator.
    pub(crate) fn flag(&self, name: &str) -> Option<bool> {
        self.record.text(name).map(|code| code == "J")
    }

    pub(crate) fn datetime(&self, name: &str) -> Result<DateTime<FixedOffset>> {
        self.opt_datetime(name)
            .ok_or_else(|| self.missing(self.path.child(name), "date-time"))
    }

    pub(crate) fn opt_datetime(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.record.temporal(name).and_then(|t| t.as_datetime())
    }

    pub(crate) fn date(&self, name: &str) -> Result<NaiveDate> {
        self.record
            .temporal(name)
            .and_then(|t| t.as_date())
            .ok_or_else(|| self.missing(self.path.child(name), "date"))
    }

    pub(crate) fn opt_duration(&self, name: &str) -> Option<TimeDelta> {
        self.record.temporal(name).and_then(|t| t.as_duration())
    }

    pub(crate) fn record(&self, name: &str) -> Result<Fields<'a>> {
        self.opt_record(name)
            .ok_or_else(|| self.missing(self.path.child(name), "record"))
    }

    pub(crate) fn opt_record(&self, name: &str) -> Option<Fields<'a>> {
        self.record.record(name).map(|record| Fields {
            kind: self.kind,
            record,
            path: self.path.child(name),
        })
    }

    /// Entries of a repeated group, in document order.
    pub(crate) fn records(&self, name: &str) -> Vec<Fields<'a>> {
        self.record
            .records(name)
            .enumerate()
            .map(|(i, record)| Fields {
                kind: self.kind,
                record,
                path: self.path.indexed(name, i + 1),
            })
            .collect()
    }

    /// Map every entry of a repeated group.
    pub(crate) fn each<T>(
        &self,
        name: &str,
        mut convert: impl FnMut(&Fields<'a>) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.records(name).iter().map(|entry| convert(entry)).collect()
    }

    fn status(&self) -> Result<InfoStatus> {
        match self.record.text(STATUS_ATTRIBUTE) {
            Some("Gepland") => Ok(InfoStatus::Gepland),
            Some("Actueel") => Ok(InfoStatus::Actueel),
            _ => Err(self.missing(self.path.attribute(STATUS_ATTRIBUTE), "Gepland or Actueel")),
        }
    }

    /// Planned/actual group whose entries convert through `convert`.
    pub(crate) fn status_values<T>(
        &self,
        name: &str,
        convert: impl Fn(&Fields<'a>) -> Result<T>,
    ) -> Result<Vec<StatusValue<T>>> {
        self.each(name, |entry| {
            Ok(StatusValue {
                status: entry.status()?,
                value: convert(entry)?,
            })
        })
    }

    pub(crate) fn status_times(&self, name: &str) -> Result<Vec<StatusValue<DateTime<FixedOffset>>>> {
        self.status_values(name, |entry| entry.datetime(CONTENT_FIELD))
    }

    pub(crate) fn status_stations(&self, name: &str) -> Result<Vec<StatusValue<Station>>> {
        self.status_values(name, Fields::station_fields)
    }

    pub(crate) fn status_tracks(&self, name: &str) -> Result<Vec<StatusValue<Track>>> {
        self.status_values(name, |entry| {
            Ok(Track {
                number: entry.integer("SpoorNummer")?,
                phase: entry.opt_text("SpoorFase"),
            })
        })
    }

    pub(crate) fn status_station_lists(&self, name: &str) -> Result<Vec<StatusValue<Vec<Station>>>> {
        self.status_values(name, |entry| entry.each("Station", Fields::station_fields))
    }

    pub(crate) fn station(&self, name: &str) -> Result<Station> {
        self.record(name)?.station_fields()
    }

    fn station_fields(&self) -> Result<Station> {
        Ok(Station {
            code: self.text("StationCode")?,
            station_type: self.opt_integer("Type"),
            short_name: self.opt_text("KorteNaam"),
            middle_name: self.opt_text("MiddelNaam"),
            long_name: self.opt_text("LangeNaam"),
            uic_code: self.opt_text("UICCode"),
        })
    }

    pub(crate) fn train_type(&self) -> Result<TrainType> {
        let train_type = self.record("TreinSoort")?;
        Ok(TrainType {
            code: train_type.text("Code")?,
            name: train_type.text(CONTENT_FIELD)?,
        })
    }

    pub(crate) fn presentation(&self, name: &str) -> Result<Option<Presentation>> {
        let Some(presentation) = self.opt_record(name) else {
            return Ok(None);
        };
        let groups = presentation.each("Uitingen", |group| {
            Ok(Utterances {
                language: group.opt_text("Taal"),
                lines: group.each("Uiting", |line| line.text(CONTENT_FIELD))?,
            })
        })?;
        Ok(Some(Presentation { groups }))
    }

    pub(crate) fn changes(&self, name: &str) -> Result<Vec<Change>> {
        self.each(name, |change| {
            Ok(Change {
                change_type: change.text("WijzigingType")?,
                cause_short: change.opt_text("WijzigingOorzaakKort"),
                cause_long: change.opt_text("WijzigingOorzaakLang"),
                station: change
                    .opt_record("WijzigingStation")
                    .map(|station| station.station_fields())
                    .transpose()?,
            })
        })
    }

    pub(crate) fn header(&self) -> Result<ProductHeader> {
        let administration = self.record("RIPAdministratie")?;
        Ok(ProductHeader {
            version: self.text("Versie")?,
            timestamp: self.datetime("TimeStamp")?,
            message_id: administration.text("ReisInformatieProductID")?,
            subscription_id: administration.integer("AbonnementId")?,
            information_time: administration.opt_datetime("ReisInformatieTijdstip"),
        })
    }
}
