//! Building blocks shared by the DVS, DAS and RIT layouts.

use super::types::{FieldSpec, FieldType};
use crate::config::STATUS_ATTRIBUTE;
use crate::temporal::TemporalFormat;

/// `J`/`N` indicator.
pub(crate) fn ja_nee() -> FieldType {
    FieldType::code(["J", "N"])
}

pub(crate) fn datetime() -> FieldType {
    FieldType::Temporal(TemporalFormat::DateTime)
}

pub(crate) fn date() -> FieldType {
    FieldType::Temporal(TemporalFormat::Date)
}

pub(crate) fn duration() -> FieldType {
    FieldType::Temporal(TemporalFormat::Duration)
}

/// `InfoStatus` attribute telling planned from actual values.
pub(crate) fn info_status() -> FieldSpec {
    FieldSpec::attribute(STATUS_ATTRIBUTE, FieldType::code(["Gepland", "Actueel"]))
}

fn station_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::element("StationCode", FieldType::Text),
        FieldSpec::element("Type", FieldType::Integer).optional(),
        FieldSpec::element("KorteNaam", FieldType::Text).optional(),
        FieldSpec::element("MiddelNaam", FieldType::Text).optional(),
        FieldSpec::element("LangeNaam", FieldType::Text).optional(),
        FieldSpec::element("UICCode", FieldType::Text).optional(),
    ]
}

/// Plain station reference.
pub(crate) fn station(name: &str) -> FieldSpec {
    FieldSpec::record(name, station_fields())
}

/// Station reference flagged planned or actual (destinations, origins).
pub(crate) fn status_station(name: &str) -> FieldSpec {
    FieldSpec::record(name, std::iter::once(info_status()).chain(station_fields()))
}

/// Date-time flagged planned or actual.
pub(crate) fn status_time(name: &str) -> FieldSpec {
    FieldSpec::record(name, [info_status(), FieldSpec::content(datetime())])
}

/// Track (spoor) flagged planned or actual, e.g. number `2` phase `b`.
pub(crate) fn track(name: &str) -> FieldSpec {
    FieldSpec::record(
        name,
        [
            info_status(),
            FieldSpec::element("SpoorNummer", FieldType::Integer),
            FieldSpec::element("SpoorFase", FieldType::Text).optional(),
        ],
    )
}

/// Station list flagged planned or actual (shortened route, stops).
pub(crate) fn station_list(name: &str) -> FieldSpec {
    FieldSpec::record(
        name,
        [info_status(), station("Station").repeated(0, None)],
    )
}

/// Presentation texts (uitingen) per language.
pub(crate) fn presentation(name: &str) -> FieldSpec {
    FieldSpec::record(
        name,
        [FieldSpec::record(
            "Uitingen",
            [
                FieldSpec::attribute("Taal", FieldType::Text).optional(),
                FieldSpec::record(
                    "Uiting",
                    [
                        FieldSpec::attribute("Prioriteit", FieldType::Integer).optional(),
                        FieldSpec::content(FieldType::Text),
                    ],
                )
                .repeated(1, None),
            ],
        )
        .repeated(1, None)],
    )
}

/// Train type with its code attribute, e.g. `<TreinSoort Code="IC">Intercity</TreinSoort>`.
pub(crate) fn train_type() -> FieldSpec {
    FieldSpec::record(
        "TreinSoort",
        [
            FieldSpec::attribute("Code", FieldType::Text),
            FieldSpec::content(FieldType::Text),
        ],
    )
}

/// Change notice (wijziging) attached to a train.
pub(crate) fn change(name: &str) -> FieldSpec {
    FieldSpec::record(
        name,
        [
            FieldSpec::element("WijzigingType", FieldType::Text),
            FieldSpec::element("WijzigingOorzaakKort", FieldType::Text).optional(),
            FieldSpec::element("WijzigingOorzaakLang", FieldType::Text).optional(),
            station("WijzigingStation").optional(),
        ],
    )
}

/// Product administration block (message id and subscription).
pub(crate) fn rip_administration() -> FieldSpec {
    FieldSpec::record(
        "RIPAdministratie",
        [
            FieldSpec::element("ReisInformatieProductID", FieldType::Text),
            FieldSpec::element("AbonnementId", FieldType::Integer),
            FieldSpec::element("ReisInformatieTijdstip", datetime()).optional(),
        ],
    )
}

/// Attributes every product element carries.
pub(crate) fn product_attributes() -> Vec<FieldSpec> {
    vec![
        FieldSpec::attribute("Versie", FieldType::Text),
        FieldSpec::attribute("TimeStamp", datetime()),
    ]
}

/// Planned and actual entries of the same value: at most two.
pub(crate) fn planned_actual(spec: FieldSpec, min: usize) -> FieldSpec {
    spec.repeated(min, Some(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NodeKind, Occurs};

    #[test]
    fn test_status_station_starts_with_status() {
        let spec = status_station("TreinEindBestemming");
        assert_eq!(spec.children()[0].name, "InfoStatus");
        assert_eq!(spec.children()[0].node, NodeKind::Attribute);
        assert_eq!(spec.children()[1].name, "StationCode");
        assert!(spec.children()[1].is_mandatory());
    }

    #[test]
    fn test_track_fields() {
        let spec = track("TreinVertrekSpoor");
        assert_eq!(spec.child("SpoorNummer").unwrap().field_type, FieldType::Integer);
        assert_eq!(spec.child("SpoorFase").unwrap().occurs, Occurs::Optional);
    }

    #[test]
    fn test_planned_actual_bounds() {
        let spec = planned_actual(status_time("VertrekTijd"), 1);
        assert_eq!(spec.occurs, Occurs::Repeated { min: 1, max: Some(2) });
    }
}
