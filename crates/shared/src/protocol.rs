use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::RoomId;

/// Largest accepted payment proof upload.
pub const MAX_PROOF_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_PROOF_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofFile {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ProofFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    pub fn has_accepted_type(&self) -> bool {
        ACCEPTED_PROOF_TYPES.contains(&self.mime_type.as_str())
    }
}

/// Form fields read from the booking page when the guest presses submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<ProofFile>,
}

/// Everything needed to drive a booking page from outside the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room: RoomId,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<NaiveDate>,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(flatten)]
    pub guest: GuestDetails,
}

fn default_guests() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub room_name: String,
    pub checkin_display: String,
    pub checkout_display: String,
    pub guests: u32,
    pub guests_display: String,
    pub total_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub room: RoomId,
    pub room_name: String,
    pub nightly_price: u64,
    pub nights: u32,
    pub room_charges: u64,
    pub tax: u64,
    pub total: u64,
}
