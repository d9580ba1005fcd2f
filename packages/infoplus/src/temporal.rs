//! Temporal normalization.
//!
//! The single conversion boundary between the schema-native date, date-time
//! and duration text of each document kind and the canonical [`Temporal`]
//! value. No other module parses or formats temporal text.
//!
//! Ambiguous input is rejected instead of guessed: two-digit years, date-times
//! without a UTC offset, and durations with year or month components (whose
//! length depends on the calendar) all fail with
//! [`InfoPlusError::MalformedTemporal`].
//!
//! # Examples
//! ```
//! use infoplus_model::temporal;
//! use infoplus_model::DocumentKind;
//!
//! let t = temporal::parse(DocumentKind::DvsPush, "2025-12-21T10:20:00+01:00").unwrap();
//! assert_eq!(
//!     temporal::format(DocumentKind::DvsPush, &t).unwrap(),
//!     "2025-12-21T10:20:00.000+01:00"
//! );
//! assert!(temporal::parse(DocumentKind::DvsPush, "2025-12-21T10:20:00").is_err());
//! ```

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeDelta};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;

/// Textual grammar a temporal field uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalFormat {
    /// `xs:dateTime` with mandatory offset.
    DateTime,
    /// `xs:date` without offset.
    Date,
    /// `xs:duration` restricted to day and time components.
    Duration,
}

impl TemporalFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for TemporalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical in-memory temporal value.
///
/// Constructed only through this module. Two values are equal when they
/// denote the same instant *and* carry the same offset, so that formatting
/// reproduces the offset the source document used.
#[derive(Debug, Clone, Copy)]
pub struct Temporal {
    repr: Repr,
}

#[derive(Debug, Clone, Copy)]
enum Repr {
    Instant(DateTime<FixedOffset>),
    Date(NaiveDate),
    Duration(TimeDelta),
}

impl Temporal {
    /// Which grammar this value belongs to.
    #[must_use]
    pub fn format(&self) -> TemporalFormat {
        match self.repr {
            Repr::Instant(_) => TemporalFormat::DateTime,
            Repr::Date(_) => TemporalFormat::Date,
            Repr::Duration(_) => TemporalFormat::Duration,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self.repr {
            Repr::Instant(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.repr {
            Repr::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self.repr {
            Repr::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl PartialEq for Temporal {
    fn eq(&self, other: &Self) -> bool {
        match (self.repr, other.repr) {
            (Repr::Instant(a), Repr::Instant(b)) => a == b && a.offset() == b.offset(),
            (Repr::Date(a), Repr::Date(b)) => a == b,
            (Repr::Duration(a), Repr::Duration(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Temporal {}

impl fmt::Display for Temporal {
    /// Kind-independent rendering; use [`format`] for document output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::Instant(dt) => f.write_str(&format_instant(dt, None)),
            Repr::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Repr::Duration(d) => f.write_str(&format_duration(d)),
        }
    }
}

impl Serialize for Temporal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-kind grammar table.
struct Grammar {
    formats: &'static [TemporalFormat],
    fraction_digits: usize,
    /// Fractional digits always written; `None` writes the shortest exact fraction.
    fixed_digits: Option<usize>,
}

fn grammar(kind: DocumentKind) -> Grammar {
    match kind {
        DocumentKind::DvsPush | DocumentKind::DasPush => Grammar {
            formats: &[
                TemporalFormat::DateTime,
                TemporalFormat::Date,
                TemporalFormat::Duration,
            ],
            fraction_digits: 3,
            fixed_digits: Some(3),
        },
        DocumentKind::RitPush => Grammar {
            formats: &[TemporalFormat::DateTime, TemporalFormat::Date],
            fraction_digits: 9,
            fixed_digits: None,
        },
    }
}

/// Formats the given kind's documents carry.
#[must_use]
pub fn supported_formats(kind: DocumentKind) -> &'static [TemporalFormat] {
    grammar(kind).formats
}

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.(\d+))?(?:Z|[+-]\d{2}:\d{2})$")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOCAL_DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?$").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("valid regex")
});

fn malformed(kind: DocumentKind, text: &str, reason: impl Into<String>) -> InfoPlusError {
    InfoPlusError::MalformedTemporal {
        kind,
        text: text.to_string(),
        reason: reason.into(),
        path: None,
    }
}

/// Parse temporal text in any grammar the kind's schema uses.
///
/// Text starting with `P` (or `-P`) is a duration, text containing `T` a
/// date-time, anything else a date.
///
/// # Errors
/// Returns `MalformedTemporal` when the text matches none of the kind's
/// grammars or is ambiguous.
pub fn parse(kind: DocumentKind, raw: &str) -> Result<Temporal> {
    let format = if raw.starts_with('P') || raw.starts_with("-P") {
        TemporalFormat::Duration
    } else if raw.contains('T') {
        TemporalFormat::DateTime
    } else {
        TemporalFormat::Date
    };
    parse_as(kind, format, raw)
}

/// Parse temporal text that must be in the given grammar.
///
/// # Errors
/// Returns `MalformedTemporal` when the text does not match `format`, or the
/// kind's schema has no such grammar.
pub fn parse_as(kind: DocumentKind, format: TemporalFormat, raw: &str) -> Result<Temporal> {
    let grammar = grammar(kind);
    if !grammar.formats.contains(&format) {
        return Err(malformed(
            kind,
            raw,
            format!("{kind} documents carry no {format} values"),
        ));
    }

    match format {
        TemporalFormat::DateTime => parse_datetime(kind, &grammar, raw),
        TemporalFormat::Date => parse_date(kind, raw),
        TemporalFormat::Duration => parse_duration(kind, raw),
    }
}

fn parse_datetime(kind: DocumentKind, grammar: &Grammar, raw: &str) -> Result<Temporal> {
    let Some(captures) = DATETIME_PATTERN.captures(raw) else {
        if LOCAL_DATETIME_PATTERN.is_match(raw) {
            return Err(malformed(kind, raw, "missing UTC offset"));
        }
        return Err(malformed(
            kind,
            raw,
            "expected YYYY-MM-DDThh:mm:ss[.fff] followed by Z or ±hh:mm",
        ));
    };

    if let Some(fraction) = captures.get(1) {
        if fraction.as_str().len() > grammar.fraction_digits {
            return Err(malformed(
                kind,
                raw,
                format!(
                    "at most {} fractional second digits allowed",
                    grammar.fraction_digits
                ),
            ));
        }
    }

    let dt = DateTime::parse_from_rfc3339(raw).map_err(|e| malformed(kind, raw, e.to_string()))?;
    Ok(Temporal {
        repr: Repr::Instant(dt),
    })
}

fn parse_date(kind: DocumentKind, raw: &str) -> Result<Temporal> {
    if !DATE_PATTERN.is_match(raw) {
        return Err(malformed(kind, raw, "expected YYYY-MM-DD"));
    }
    let d = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| malformed(kind, raw, e.to_string()))?;
    Ok(Temporal {
        repr: Repr::Date(d),
    })
}

fn parse_duration(kind: DocumentKind, raw: &str) -> Result<Temporal> {
    let Some(captures) = DURATION_PATTERN.captures(raw) else {
        return Err(malformed(kind, raw, "expected [-]P[nD][T[nH][nM][nS]]"));
    };

    if captures.get(2).is_some() || captures.get(3).is_some() {
        return Err(malformed(
            kind,
            raw,
            "year and month components have no fixed length",
        ));
    }
    if (4..=7).all(|i| captures.get(i).is_none()) || raw.ends_with('T') {
        return Err(malformed(kind, raw, "duration has no components"));
    }

    let component = |index: usize, unit: i64| -> Result<i64> {
        let Some(m) = captures.get(index) else {
            return Ok(0);
        };
        if m.as_str().contains('.') {
            return Err(malformed(kind, raw, "fractional seconds are not supported"));
        }
        m.as_str()
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_mul(unit))
            .ok_or_else(|| malformed(kind, raw, "duration out of range"))
    };

    let total = [
        component(4, 86_400)?,
        component(5, 3_600)?,
        component(6, 60)?,
        component(7, 1)?,
    ]
    .into_iter()
    .try_fold(0i64, i64::checked_add)
    .ok_or_else(|| malformed(kind, raw, "duration out of range"))?;

    let signed = if captures.get(1).is_some() { -total } else { total };
    let delta =
        TimeDelta::try_seconds(signed).ok_or_else(|| malformed(kind, raw, "duration out of range"))?;
    Ok(Temporal {
        repr: Repr::Duration(delta),
    })
}

/// Format a temporal value in the kind's schema grammar.
///
/// Exact inverse of [`parse`] for the same kind.
///
/// # Errors
/// Returns `MalformedTemporal` when the kind's schema cannot represent the
/// value (no such grammar, or more sub-second precision than it allows).
pub fn format(kind: DocumentKind, value: &Temporal) -> Result<String> {
    let grammar = grammar(kind);
    let format = value.format();
    if !grammar.formats.contains(&format) {
        return Err(malformed(
            kind,
            &value.to_string(),
            format!("{kind} documents carry no {format} values"),
        ));
    }

    match value.repr {
        Repr::Instant(dt) => {
            check_precision(kind, &grammar, dt)?;
            Ok(format_instant(dt, grammar.fixed_digits))
        }
        Repr::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
        Repr::Duration(d) => Ok(format_duration(d)),
    }
}

fn check_precision(kind: DocumentKind, grammar: &Grammar, dt: DateTime<FixedOffset>) -> Result<()> {
    let step = 10u32.pow(9 - grammar.fraction_digits as u32);
    if dt.timestamp_subsec_nanos() % step != 0 {
        return Err(malformed(
            kind,
            &format_instant(dt, None),
            format!(
                "more than {} fractional second digits",
                grammar.fraction_digits
            ),
        ));
    }
    Ok(())
}

/// RFC 3339 text with `Z` for UTC and either `digits` fractional digits or,
/// when `None`, the fraction with trailing zeros removed.
fn format_instant(dt: DateTime<FixedOffset>, digits: Option<usize>) -> String {
    let mut fraction = format!("{:09}", dt.timestamp_subsec_nanos() % 1_000_000_000);
    let len = digits.unwrap_or_else(|| fraction.trim_end_matches('0').len());
    fraction.truncate(len);

    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    if dt.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&dt.format("%:z").to_string());
    }
    out
}

fn check_year(kind: DocumentKind, year: i32, text: &str) -> Result<()> {
    if (0..=9999).contains(&year) {
        Ok(())
    } else {
        Err(malformed(kind, text, "year must have exactly four digits"))
    }
}

/// Canonical duration text: `[-]PT[nH][nM][nS]`, `PT0S` for zero.
fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    if total == 0 {
        return "PT0S".to_string();
    }

    let abs = total.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3_600, abs % 3_600 / 60, abs % 60);

    let mut out = String::from(if total < 0 { "-PT" } else { "PT" });
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Build an instant for application-constructed records.
///
/// # Errors
/// Returns `MalformedTemporal` when the kind cannot represent the value.
pub fn instant(kind: DocumentKind, dt: DateTime<FixedOffset>) -> Result<Temporal> {
    let text = format_instant(dt, None);
    check_year(kind, dt.year(), &text)?;
    check_precision(kind, &grammar(kind), dt)?;
    Ok(Temporal {
        repr: Repr::Instant(dt),
    })
}

/// Build a calendar date for application-constructed records.
///
/// # Errors
/// Returns `MalformedTemporal` when the year falls outside 0000..=9999.
pub fn date(kind: DocumentKind, d: NaiveDate) -> Result<Temporal> {
    check_year(kind, d.year(), &d.to_string())?;
    Ok(Temporal {
        repr: Repr::Date(d),
    })
}

/// Build a duration for application-constructed records.
///
/// # Errors
/// Returns `MalformedTemporal` when the kind has no duration grammar or the
/// duration has a sub-second part.
pub fn duration(kind: DocumentKind, delta: TimeDelta) -> Result<Temporal> {
    let text = format_duration(delta);
    if !grammar(kind).formats.contains(&TemporalFormat::Duration) {
        return Err(malformed(kind, &text, format!("{kind} documents carry no duration values")));
    }
    if delta.subsec_nanos() != 0 {
        return Err(malformed(kind, &text, "fractional seconds are not supported"));
    }
    Ok(Temporal {
        repr: Repr::Duration(delta),
    })
}
