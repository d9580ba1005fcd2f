//! Typed view of a DVS (departure board) document.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

use super::common::{Change, Fields, Presentation, ProductHeader, Station, StatusValue, Track, TrainType};
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::DocumentRecord;

/// Departure of one train from one station.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureBoard {
    pub header: ProductHeader,
    pub ride_id: i64,
    pub ride_date: NaiveDate,
    pub station: Station,
    pub train: DepartingTrain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartingTrain {
    pub number: i64,
    pub train_type: TrainType,
    pub formula: Option<String>,
    pub status: Option<i64>,
    pub carrier: String,
    pub reservation_required: Option<bool>,
    pub supplement_required: Option<bool>,
    pub do_not_board: Option<bool>,
    pub rear_part_remains: Option<bool>,
    pub shunting: Option<bool>,
    pub special_ticket: Option<bool>,
    pub destinations: Vec<StatusValue<Station>>,
    pub destination_presentation: Option<Presentation>,
    pub departure_times: Vec<StatusValue<DateTime<FixedOffset>>>,
    pub exact_delay: Option<TimeDelta>,
    pub delay_presentation: Option<Presentation>,
    pub damped_delay: Option<TimeDelta>,
    pub tracks: Vec<StatusValue<Track>>,
    pub track_presentation: Option<Presentation>,
    /// Platform side the train departs towards (`A` or `B`).
    pub direction: Option<String>,
    pub shortened_route: Vec<StatusValue<Vec<Station>>>,
    pub route_presentation: Option<Presentation>,
    pub wings: Vec<TrainWing>,
    pub changes: Vec<Change>,
}

/// Train wing (vleugel): the part of a train running to one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainWing {
    pub tracks: Vec<StatusValue<Track>>,
    pub track_presentation: Option<Presentation>,
    pub destinations: Vec<StatusValue<Station>>,
    pub destination_presentation: Option<Presentation>,
    pub rolling_stock: Vec<RollingStock>,
    pub stops: Vec<StatusValue<Vec<Station>>>,
    pub stops_presentation: Option<Presentation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollingStock {
    pub kind: String,
    pub designation: Option<String>,
    /// Length in centimetres.
    pub length: Option<i64>,
    pub destinations: Vec<StatusValue<Station>>,
    pub departure_order: Option<i64>,
    pub number: Option<String>,
}

impl TryFrom<&DocumentRecord> for DepartureBoard {
    type Error = InfoPlusError;

    fn try_from(document: &DocumentRecord) -> Result<Self> {
        let product = Fields::product(document, DocumentKind::DvsPush)?;
        let board = product.record(DocumentKind::DvsPush.payload_element())?;
        let train = board.record("Trein")?;

        Ok(Self {
            header: product.header()?,
            ride_id: board.integer("RitId")?,
            ride_date: board.date("RitDatum")?,
            station: board.station("RitStation")?,
            train: DepartingTrain {
                number: train.integer("TreinNummer")?,
                train_type: train.train_type()?,
                formula: train.opt_text("TreinFormule"),
                status: train.opt_integer("TreinStatus"),
                carrier: train.text("Vervoerder")?,
                reservation_required: train.flag("Reserveren"),
                supplement_required: train.flag("Toeslag"),
                do_not_board: train.flag("NietInstappen"),
                rear_part_remains: train.flag("AchterBlijvenAchtersteTreinDeel"),
                shunting: train.flag("RangeerBeweging"),
                special_ticket: train.flag("SpeciaalKaartje"),
                destinations: train.status_stations("TreinEindBestemming")?,
                destination_presentation: train.presentation("PresentatieTreinEindBestemming")?,
                departure_times: train.status_times("VertrekTijd")?,
                exact_delay: train.opt_duration("ExacteVertrekVertraging"),
                delay_presentation: train.presentation("PresentatieVertrekVertraging")?,
                damped_delay: train.opt_duration("GedempteVertrekVertraging"),
                tracks: train.status_tracks("TreinVertrekSpoor")?,
                track_presentation: train.presentation("PresentatieTreinVertrekSpoor")?,
                direction: train.opt_text("VertrekRichting"),
                shortened_route: train.status_station_lists("VerkorteRoute")?,
                route_presentation: train.presentation("PresentatieVerkorteRoute")?,
                wings: train.each("TreinVleugel", wing)?,
                changes: train.changes("Wijziging")?,
            },
        })
    }
}

fn wing(wing: &Fields<'_>) -> Result<TrainWing> {
    Ok(TrainWing {
        tracks: wing.status_tracks("TreinVleugelVertrekSpoor")?,
        track_presentation: wing.presentation("PresentatieTreinVleugelVertrekSpoor")?,
        destinations: wing.status_stations("TreinVleugelEindBestemming")?,
        destination_presentation: wing.presentation("PresentatieTreinVleugelEindBestemming")?,
        rolling_stock: wing.each("MaterieelDeelDVS", |part| {
            Ok(RollingStock {
                kind: part.text("MaterieelSoort")?,
                designation: part.opt_text("MaterieelAanduiding"),
                length: part.opt_integer("MaterieelLengte"),
                destinations: part.status_stations("MaterieelDeelEindBestemming")?,
                departure_order: part.opt_integer("MaterieelDeelVolgordeVertrek"),
                number: part.opt_text("MaterieelNummer"),
            })
        })?,
        stops: wing.status_station_lists("StopStations")?,
        stops_presentation: wing.presentation("PresentatieStopStations")?,
    })
}
