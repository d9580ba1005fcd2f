//! Typed read-only views of decoded documents.
//!
//! Each view is built from a [`DocumentRecord`](crate::model::DocumentRecord)
//! of its kind with `TryFrom`, and fails if the record is of another kind or
//! does not validate.
//!
//! ```
//! use infoplus_model::views::{actual, DepartureBoard};
//!
//! fn announce(xml: &[u8]) -> infoplus_model::Result<()> {
//!     let board: DepartureBoard = infoplus_model::parse_dvs(xml)?;
//!     if let Some(track) = actual(&board.train.tracks) {
//!         println!("train {} departs from track {track}", board.train.number);
//!     }
//!     Ok(())
//! }
//! ```

mod common;
mod das;
mod dvs;
mod rit;

pub use common::{
    actual, planned, Change, InfoStatus, Presentation, ProductHeader, Station, StatusValue, Track,
    TrainType, Utterances,
};
pub use das::{ArrivalBoard, ArrivingTrain};
pub use dvs::{DepartingTrain, DepartureBoard, RollingStock, TrainWing};
pub use rit::{LogicalRide, RideInfo, RidePart, RideStop, RollingStockPart};
