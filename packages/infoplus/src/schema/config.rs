//! Registry configuration for the InfoPlus push exports.

use std::sync::LazyLock;

use super::das::das_product;
use super::dvs::dvs_product;
use super::registry::{SchemaEntry, SchemaRegistry};
use super::rit::rit_product;
use crate::config::{
    DAS_MESSAGE_NAMESPACE, DVS_MESSAGE_NAMESPACE, NDOV_DATA_NAMESPACE, RIT_DATA_NAMESPACE,
    RIT_MESSAGE_NAMESPACE,
};
use crate::kind::DocumentKind;

static INFOPLUS: LazyLock<SchemaRegistry> = LazyLock::new(create_infoplus_registry);

/// Create a registry with the DVS, DAS and RIT layouts.
///
/// DAS v1.0.0 does not fix the order of its child elements, so its entry
/// accepts them in any order.
#[must_use]
pub fn create_infoplus_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    registry.register(SchemaEntry::new(
        DocumentKind::DvsPush,
        DVS_MESSAGE_NAMESPACE,
        NDOV_DATA_NAMESPACE,
        dvs_product(),
    ));
    registry.register(
        SchemaEntry::new(
            DocumentKind::DasPush,
            DAS_MESSAGE_NAMESPACE,
            NDOV_DATA_NAMESPACE,
            das_product(),
        )
        .with_strict_ordering(false),
    );
    registry.register(SchemaEntry::new(
        DocumentKind::RitPush,
        RIT_MESSAGE_NAMESPACE,
        RIT_DATA_NAMESPACE,
        rit_product(),
    ));

    registry
}

/// Process-wide registry with every supported kind, built on first use.
#[must_use]
pub fn infoplus() -> &'static SchemaRegistry {
    &INFOPLUS
}
