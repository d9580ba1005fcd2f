//! Typed view of a RIT (ride information) document.

use chrono::{DateTime, FixedOffset, NaiveDate};

use super::common::{Fields, ProductHeader, Station, StatusValue, Track, TrainType};
use crate::config::CONTENT_FIELD;
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::DocumentRecord;

/// A complete ride with every stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RideInfo {
    pub header: ProductHeader,
    pub application_version: Option<String>,
    pub train_number: i64,
    pub train_date: NaiveDate,
    pub train_type: TrainType,
    pub carrier: String,
    pub reservation_required: Option<bool>,
    pub supplement_required: Option<bool>,
    pub special_ticket: Option<bool>,
    pub journey_planner: Option<bool>,
    pub logical_rides: Vec<LogicalRide>,
}

impl RideInfo {
    /// Every stop of every ride part, in document order.
    pub fn stops(&self) -> impl Iterator<Item = &RideStop> {
        self.logical_rides
            .iter()
            .flat_map(|ride| &ride.parts)
            .flat_map(|part| &part.stops)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalRide {
    pub number: String,
    pub parts: Vec<RidePart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RidePart {
    pub number: i64,
    pub stops: Vec<RideStop>,
}

/// One station along the ride.
#[derive(Debug, Clone, PartialEq)]
pub struct RideStop {
    pub station: Station,
    pub accessible: Option<bool>,
    pub travel_assistance: Option<bool>,
    pub arrival_times: Vec<StatusValue<DateTime<FixedOffset>>>,
    pub departure_times: Vec<StatusValue<DateTime<FixedOffset>>>,
    pub arrival_tracks: Vec<StatusValue<Track>>,
    pub departure_tracks: Vec<StatusValue<Track>>,
    /// Whether the train calls here.
    pub stops: Vec<StatusValue<bool>>,
    pub destinations: Vec<StatusValue<Station>>,
    pub rolling_stock: Vec<RollingStockPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollingStockPart {
    pub id: String,
    pub kind: Option<String>,
    pub designation: Option<String>,
    /// Length in centimetres.
    pub length: Option<i64>,
}

impl TryFrom<&DocumentRecord> for RideInfo {
    type Error = InfoPlusError;

    fn try_from(document: &DocumentRecord) -> Result<Self> {
        let product = Fields::product(document, DocumentKind::RitPush)?;
        let ride = product.record(DocumentKind::RitPush.payload_element())?;

        Ok(Self {
            header: product.header()?,
            application_version: product.opt_text("ApplicatieVersie"),
            train_number: ride.integer("TreinNummer")?,
            train_date: ride.date("TreinDatum")?,
            train_type: ride.train_type()?,
            carrier: ride.text("Vervoerder")?,
            reservation_required: ride.flag("Reserveren"),
            supplement_required: ride.flag("Toeslag"),
            special_ticket: ride.flag("SpeciaalKaartje"),
            journey_planner: ride.flag("Reisplanner"),
            logical_rides: ride.each("LogischeRit", |logical| {
                Ok(LogicalRide {
                    number: logical.text("LogischeRitNummer")?,
                    parts: logical.each("LogischeRitDeel", |part| {
                        Ok(RidePart {
                            number: part.integer("LogischeRitDeelNummer")?,
                            stops: part.each("LogischeRitDeelStation", stop)?,
                        })
                    })?,
                })
            })?,
        })
    }
}

fn stop(stop: &Fields<'_>) -> Result<RideStop> {
    Ok(RideStop {
        station: stop.station("Station")?,
        accessible: stop.flag("StationToegankelijk"),
        travel_assistance: stop.flag("StationReisAssistentie"),
        arrival_times: stop.status_times("AankomstTijd")?,
        departure_times: stop.status_times("VertrekTijd")?,
        arrival_tracks: stop.status_tracks("TreinAankomstSpoor")?,
        departure_tracks: stop.status_tracks("TreinVertrekSpoor")?,
        stops: stop.status_values("Stopt", |entry| Ok(entry.flag(CONTENT_FIELD) == Some(true)))?,
        destinations: stop.status_stations("TreinEindBestemming")?,
        rolling_stock: stop.each("MaterieelDeel", |part| {
            Ok(RollingStockPart {
                id: part.text("MaterieelDeelID")?,
                kind: part.opt_text("MaterieelDeelSoort"),
                designation: part.opt_text("MaterieelDeelAanduiding"),
                length: part.opt_integer("MaterieelDeelLengte"),
            })
        })?,
    })
}
