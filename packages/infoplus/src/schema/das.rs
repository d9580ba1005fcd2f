//! DAS (Dynamische AankomstStaat) push export layout, schema v1.0.0.
//!
//! Same product shape as DVS, with the arrival-side train block
//! (`TreinAankomst`). DAS v1 does not fix the order of its child elements.

use super::common::{
    change, date, duration, planned_actual, presentation, product_attributes,
    rip_administration, station, station_list, status_station, status_time, track, train_type,
};
use super::types::{FieldSpec, FieldType};
use crate::kind::DocumentKind;

fn arriving_train() -> FieldSpec {
    FieldSpec::record(
        "TreinAankomst",
        [
            FieldSpec::element("TreinNummer", FieldType::Integer),
            train_type(),
            FieldSpec::element("TreinFormule", FieldType::Text).optional(),
            FieldSpec::element("TreinStatus", FieldType::Integer).optional(),
            FieldSpec::element("Vervoerder", FieldType::Text),
            planned_actual(status_station("TreinHerkomst"), 1),
            presentation("PresentatieTreinHerkomst").optional(),
            planned_actual(status_time("AankomstTijd"), 1),
            FieldSpec::element("ExacteAankomstVertraging", duration()).optional(),
            presentation("PresentatieAankomstVertraging").optional(),
            FieldSpec::element("GedempteAankomstVertraging", duration()).optional(),
            planned_actual(track("TreinAankomstSpoor"), 0),
            presentation("PresentatieTreinAankomstSpoor").optional(),
            planned_actual(station_list("VerkorteRouteHerkomst"), 0),
            presentation("PresentatieVerkorteRouteHerkomst").optional(),
            change("WijzigingHerkomst").repeated(0, None),
        ],
    )
    .with_distinct_status([
        "TreinHerkomst",
        "AankomstTijd",
        "TreinAankomstSpoor",
        "VerkorteRouteHerkomst",
    ])
}

/// Product element of a DAS message.
pub(crate) fn das_product() -> FieldSpec {
    FieldSpec::record(
        DocumentKind::DasPush.product_element(),
        product_attributes().into_iter().chain([
            rip_administration(),
            FieldSpec::record(
                DocumentKind::DasPush.payload_element(),
                [
                    FieldSpec::element("RitId", FieldType::Integer),
                    FieldSpec::element("RitDatum", date()),
                    station("RitStation"),
                    arriving_train(),
                ],
            ),
        ]),
    )
}
