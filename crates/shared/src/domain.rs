use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownRoom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomId {
    Deluxe,
    Executive,
    Presidential,
}

impl RoomId {
    pub const ALL: [RoomId; 3] = [RoomId::Deluxe, RoomId::Executive, RoomId::Presidential];

    pub fn key(self) -> &'static str {
        match self {
            RoomId::Deluxe => "deluxe",
            RoomId::Executive => "executive",
            RoomId::Presidential => "presidential",
        }
    }

    pub fn entry(self) -> &'static RoomCatalogEntry {
        match self {
            RoomId::Deluxe => &ROOM_CATALOG[0],
            RoomId::Executive => &ROOM_CATALOG[1],
            RoomId::Presidential => &ROOM_CATALOG[2],
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RoomId {
    type Err = UnknownRoom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| UnknownRoom(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomCatalogEntry {
    pub id: RoomId,
    pub name: &'static str,
    /// Nightly rate in whole rupiah.
    pub price: u64,
    pub description: &'static str,
}

pub static ROOM_CATALOG: [RoomCatalogEntry; 3] = [
    RoomCatalogEntry {
        id: RoomId::Deluxe,
        name: "Deluxe Room",
        price: 1_500_000,
        description: "35 m² • City View • Sleeps 2",
    },
    RoomCatalogEntry {
        id: RoomId::Executive,
        name: "Executive Suite",
        price: 3_000_000,
        description: "60 m² • Mountain View • Sleeps 3",
    },
    RoomCatalogEntry {
        id: RoomId::Presidential,
        name: "Presidential Suite",
        price: 7_500_000,
        description: "120 m² • Panoramic View • Sleeps 4",
    },
];

/// Free-form payment method token as chosen on the page ("qris", "bca", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethod(pub String);

impl PaymentMethod {
    pub const QRIS: &'static str = "qris";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn is_qris(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::QRIS)
    }

    pub fn display_label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Facilities,
    RoomSelection,
    BookingForm,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Facilities,
        WizardStep::RoomSelection,
        WizardStep::BookingForm,
    ];

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Facilities => 1,
            WizardStep::RoomSelection => 2,
            WizardStep::BookingForm => 3,
        }
    }

    /// Element id of the page section shown for this step.
    pub fn section_id(self) -> &'static str {
        match self {
            WizardStep::Facilities => "facilities-view",
            WizardStep::RoomSelection => "rooms-selection",
            WizardStep::BookingForm => "booking-form",
        }
    }

    pub fn progress_percent(self) -> f64 {
        f64::from(self.number()) / 3.0 * 100.0
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = crate::error::StepOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WizardStep::Facilities),
            2 => Ok(WizardStep::RoomSelection),
            3 => Ok(WizardStep::BookingForm),
            other => Err(crate::error::StepOutOfRange(other)),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
