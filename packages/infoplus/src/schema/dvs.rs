//! DVS (Dynamische VertrekStaat) push export layout, schema v5.0.0.
//!
//! ```text
//! ReisInformatieProductDVS @Versie @TimeStamp
//! ├── RIPAdministratie
//! └── DynamischeVertrekStaat
//!     ├── RitId, RitDatum, RitStation
//!     └── Trein
//!         ├── TreinEindBestemming*, VertrekTijd*, TreinVertrekSpoor*, VerkorteRoute*
//!         └── TreinVleugel+
//!             ├── TreinVleugelVertrekSpoor*, TreinVleugelEindBestemming*
//!             ├── MaterieelDeelDVS*
//!             └── StopStations*
//! ```

use super::common::{
    change, date, duration, ja_nee, planned_actual, presentation,
    product_attributes, rip_administration, station, station_list, status_station, status_time,
    track, train_type,
};
use super::types::{FieldSpec, FieldType};
use crate::kind::DocumentKind;

fn rolling_stock() -> FieldSpec {
    FieldSpec::record(
        "MaterieelDeelDVS",
        [
            FieldSpec::element("MaterieelSoort", FieldType::Text),
            FieldSpec::element("MaterieelAanduiding", FieldType::Text).optional(),
            FieldSpec::element("MaterieelLengte", FieldType::Integer).optional(),
            planned_actual(status_station("MaterieelDeelEindBestemming"), 0),
            FieldSpec::element("MaterieelDeelVolgordeVertrek", FieldType::Integer).optional(),
            FieldSpec::element("MaterieelNummer", FieldType::Text).optional(),
        ],
    )
    .with_distinct_status(["MaterieelDeelEindBestemming"])
}

fn train_wing() -> FieldSpec {
    FieldSpec::record(
        "TreinVleugel",
        [
            planned_actual(track("TreinVleugelVertrekSpoor"), 0),
            presentation("PresentatieTreinVleugelVertrekSpoor").optional(),
            planned_actual(status_station("TreinVleugelEindBestemming"), 1),
            presentation("PresentatieTreinVleugelEindBestemming").optional(),
            rolling_stock().repeated(0, None),
            planned_actual(station_list("StopStations"), 0),
            presentation("PresentatieStopStations").optional(),
        ],
    )
    .with_distinct_status([
        "TreinVleugelVertrekSpoor",
        "TreinVleugelEindBestemming",
        "StopStations",
    ])
}

fn departing_train() -> FieldSpec {
    FieldSpec::record(
        "Trein",
        [
            FieldSpec::element("TreinNummer", FieldType::Integer),
            train_type(),
            FieldSpec::element("TreinFormule", FieldType::Text).optional(),
            FieldSpec::element("TreinStatus", FieldType::Integer).optional(),
            FieldSpec::element("Vervoerder", FieldType::Text),
            FieldSpec::element("Reserveren", ja_nee()).optional(),
            FieldSpec::element("Toeslag", ja_nee()).optional(),
            FieldSpec::element("NietInstappen", ja_nee()).optional(),
            FieldSpec::element("AchterBlijvenAchtersteTreinDeel", ja_nee()).optional(),
            FieldSpec::element("RangeerBeweging", ja_nee()).optional(),
            FieldSpec::element("SpeciaalKaartje", ja_nee()).optional(),
            planned_actual(status_station("TreinEindBestemming"), 1),
            presentation("PresentatieTreinEindBestemming").optional(),
            planned_actual(status_time("VertrekTijd"), 1),
            FieldSpec::element("ExacteVertrekVertraging", duration()).optional(),
            presentation("PresentatieVertrekVertraging").optional(),
            FieldSpec::element("GedempteVertrekVertraging", duration()).optional(),
            planned_actual(track("TreinVertrekSpoor"), 0),
            presentation("PresentatieTreinVertrekSpoor").optional(),
            FieldSpec::element("VertrekRichting", FieldType::code(["A", "B"])).optional(),
            planned_actual(station_list("VerkorteRoute"), 0),
            presentation("PresentatieVerkorteRoute").optional(),
            train_wing().repeated(1, None),
            change("Wijziging").repeated(0, None),
        ],
    )
    .with_distinct_status([
        "TreinEindBestemming",
        "VertrekTijd",
        "TreinVertrekSpoor",
        "VerkorteRoute",
    ])
}

/// Product element of a DVS message.
pub(crate) fn dvs_product() -> FieldSpec {
    FieldSpec::record(
        DocumentKind::DvsPush.product_element(),
        product_attributes().into_iter().chain([
            rip_administration(),
            FieldSpec::record(
                DocumentKind::DvsPush.payload_element(),
                [
                    FieldSpec::element("RitId", FieldType::Integer),
                    FieldSpec::element("RitDatum", date()),
                    station("RitStation"),
                    departing_train(),
                ],
            ),
        ]),
    )
}
