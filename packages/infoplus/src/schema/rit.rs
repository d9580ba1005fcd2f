//! RIT (RitInfo) push export layout, schema v5.
//!
//! ```text
//! ReisInformatieProductRitInfo @Versie @TimeStamp @ApplicatieVersie
//! ├── RIPAdministratie
//! └── RitInfo
//!     └── LogischeRit+
//!         └── LogischeRitDeel+
//!             └── LogischeRitDeelStation+ (one per stop)
//! ```

use super::common::{
    date, info_status, ja_nee, planned_actual, product_attributes, rip_administration,
    station, status_station, status_time, track, train_type,
};
use super::types::{Constraint, FieldSpec, FieldType};
use crate::config::STATUS_ATTRIBUTE;
use crate::kind::DocumentKind;

fn rolling_stock() -> FieldSpec {
    FieldSpec::record(
        "MaterieelDeel",
        [
            FieldSpec::element("MaterieelDeelID", FieldType::Text),
            FieldSpec::element("MaterieelDeelSoort", FieldType::Text).optional(),
            FieldSpec::element("MaterieelDeelAanduiding", FieldType::Text).optional(),
            FieldSpec::element("MaterieelDeelLengte", FieldType::Integer).optional(),
        ],
    )
}

fn ride_stop() -> FieldSpec {
    FieldSpec::record(
        "LogischeRitDeelStation",
        [
            station("Station"),
            FieldSpec::element("StationToegankelijk", ja_nee()).optional(),
            FieldSpec::element("StationReisAssistentie", ja_nee()).optional(),
            planned_actual(status_time("AankomstTijd"), 0),
            planned_actual(status_time("VertrekTijd"), 0),
            planned_actual(track("TreinAankomstSpoor"), 0),
            planned_actual(track("TreinVertrekSpoor"), 0),
            planned_actual(
                FieldSpec::record("Stopt", [info_status(), FieldSpec::content(ja_nee())]),
                0,
            ),
            planned_actual(status_station("TreinEindBestemming"), 0),
            rolling_stock().repeated(0, None),
        ],
    )
    .with_constraint(Constraint::NotBefore {
        earlier: "AankomstTijd".to_string(),
        later: "VertrekTijd".to_string(),
        paired_by: STATUS_ATTRIBUTE.to_string(),
    })
    .with_distinct_status([
        "AankomstTijd",
        "VertrekTijd",
        "TreinAankomstSpoor",
        "TreinVertrekSpoor",
        "Stopt",
        "TreinEindBestemming",
    ])
}

fn ride_part() -> FieldSpec {
    FieldSpec::record(
        "LogischeRitDeel",
        [
            FieldSpec::element("LogischeRitDeelNummer", FieldType::Integer),
            ride_stop().repeated(1, None),
        ],
    )
}

fn logical_ride() -> FieldSpec {
    FieldSpec::record(
        "LogischeRit",
        [
            FieldSpec::element("LogischeRitNummer", FieldType::Text),
            ride_part().repeated(1, None),
        ],
    )
}

/// Product element of a RIT message.
pub(crate) fn rit_product() -> FieldSpec {
    let mut fields = product_attributes();
    fields.push(FieldSpec::attribute("ApplicatieVersie", FieldType::Text).optional());
    fields.push(rip_administration());
    fields.push(FieldSpec::record(
        DocumentKind::RitPush.payload_element(),
        [
            FieldSpec::element("TreinNummer", FieldType::Integer),
            FieldSpec::element("TreinDatum", date()),
            train_type(),
            FieldSpec::element("Vervoerder", FieldType::Text),
            FieldSpec::element("Reserveren", ja_nee()).optional(),
            FieldSpec::element("Toeslag", ja_nee()).optional(),
            FieldSpec::element("SpeciaalKaartje", ja_nee()).optional(),
            FieldSpec::element("Reisplanner", ja_nee()).optional(),
            logical_ride().repeated(1, None),
        ],
    ));
    FieldSpec::record(DocumentKind::RitPush.product_element(), fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rit_stop_constraints() {
        let stop = ride_stop();
        assert!(stop.constraints.contains(&Constraint::NotBefore {
            earlier: "AankomstTijd".to_string(),
            later: "VertrekTijd".to_string(),
            paired_by: "InfoStatus".to_string(),
        }));
        assert_eq!(stop.constraints.len(), 7);
    }

    #[test]
    fn test_rit_product_attributes() {
        let product = rit_product();
        let attributes: Vec<_> = product.attributes().map(|s| s.name.as_str()).collect();
        assert_eq!(attributes, vec!["Versie", "TimeStamp", "ApplicatieVersie"]);
    }
}
