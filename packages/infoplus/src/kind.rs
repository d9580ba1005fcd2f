//! Document kinds of the InfoPlus push export family.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InfoPlusError;

/// The three supported InfoPlus feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Dynamische VertrekStaat: departure board per station.
    #[serde(rename = "DVS")]
    DvsPush,

    /// Dynamische AankomstStaat: arrival board per station.
    #[serde(rename = "DAS")]
    DasPush,

    /// RitInfo: full ride with all stops.
    #[serde(rename = "RIT")]
    RitPush,
}

impl DocumentKind {
    /// All kinds, in registration order.
    pub const ALL: [DocumentKind; 3] = [Self::DvsPush, Self::DasPush, Self::RitPush];

    /// Short feed name as used in the InfoPlus documentation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DvsPush => "DVS",
            Self::DasPush => "DAS",
            Self::RitPush => "RIT",
        }
    }

    /// Version tag of the schema contract this kind is bound to.
    #[must_use]
    pub fn schema_version(&self) -> &'static str {
        match self {
            Self::DvsPush => "v5.0.0",
            Self::DasPush => "v1.0.0",
            Self::RitPush => "v5",
        }
    }

    /// Local name of the product element wrapped by the message envelope.
    #[must_use]
    pub fn product_element(&self) -> &'static str {
        match self {
            Self::DvsPush => "ReisInformatieProductDVS",
            Self::DasPush => "ReisInformatieProductDAS",
            Self::RitPush => "ReisInformatieProductRitInfo",
        }
    }

    /// Local name of the payload element inside the product.
    #[must_use]
    pub fn payload_element(&self) -> &'static str {
        match self {
            Self::DvsPush => "DynamischeVertrekStaat",
            Self::DasPush => "DynamischeAankomstStaat",
            Self::RitPush => "RitInfo",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = InfoPlusError;

    /// Parse a feed name (`DVS`, `DAS`, `RIT`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DVS" => Ok(Self::DvsPush),
            "DAS" => Ok(Self::DasPush),
            "RIT" => Ok(Self::RitPush),
            _ => Err(InfoPlusError::UnknownKind(s.to_string())),
        }
    }
}
