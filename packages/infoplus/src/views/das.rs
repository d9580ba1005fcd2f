//! Typed view of a DAS (arrival board) document.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

use super::common::{Change, Fields, Presentation, ProductHeader, Station, StatusValue, Track, TrainType};
use crate::error::{InfoPlusError, Result};
use crate::kind::DocumentKind;
use crate::model::DocumentRecord;

/// Arrival of one train at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalBoard {
    pub header: ProductHeader,
    pub ride_id: i64,
    pub ride_date: NaiveDate,
    pub station: Station,
    pub train: ArrivingTrain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrivingTrain {
    pub number: i64,
    pub train_type: TrainType,
    pub formula: Option<String>,
    pub status: Option<i64>,
    pub carrier: String,
    pub origins: Vec<StatusValue<Station>>,
    pub origin_presentation: Option<Presentation>,
    pub arrival_times: Vec<StatusValue<DateTime<FixedOffset>>>,
    pub exact_delay: Option<TimeDelta>,
    pub delay_presentation: Option<Presentation>,
    pub damped_delay: Option<TimeDelta>,
    pub tracks: Vec<StatusValue<Track>>,
    pub track_presentation: Option<Presentation>,
    pub shortened_route: Vec<StatusValue<Vec<Station>>>,
    pub route_presentation: Option<Presentation>,
    pub changes: Vec<Change>,
}

impl TryFrom<&DocumentRecord> for ArrivalBoard {
    type Error = InfoPlusError;

    fn try_from(document: &DocumentRecord) -> Result<Self> {
        let product = Fields::product(document, DocumentKind::DasPush)?;
        let board = product.record(DocumentKind::DasPush.payload_element())?;
        let train = board.record("TreinAankomst")?;

        Ok(Self {
            header: product.header()?,
            ride_id: board.integer("RitId")?,
            ride_date: board.date("RitDatum")?,
            station: board.station("RitStation")?,
            train: ArrivingTrain {
                number: train.integer("TreinNummer")?,
                train_type: train.train_type()?,
                formula: train.opt_text("TreinFormule"),
                status: train.opt_integer("TreinStatus"),
                carrier: train.text("Vervoerder")?,
                origins: train.status_stations("TreinHerkomst")?,
                origin_presentation: train.presentation("PresentatieTreinHerkomst")?,
                arrival_times: train.status_times("AankomstTijd")?,
                exact_delay: train.opt_duration("ExacteAankomstVertraging"),
                delay_presentation: train.presentation("PresentatieAankomstVertraging")?,
                damped_delay: train.opt_duration("GedempteAankomstVertraging"),
                tracks: train.status_tracks("TreinAankomstSpoor")?,
                track_presentation: train.presentation("PresentatieTreinAankomstSpoor")?,
                shortened_route: train.status_station_lists("VerkorteRouteHerkomst")?,
                route_presentation: train.presentation("PresentatieVerkorteRouteHerkomst")?,
                changes: train.changes("WijzigingHerkomst")?,
            },
        })
    }
}
