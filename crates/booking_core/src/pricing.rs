//! Price summary for the selected room.

use shared::{domain::RoomId, protocol::PriceSummary};

/// Every booking made through the wizard is quoted for a fixed stay.
pub const NIGHTS: u32 = 2;
/// Tax and service charge, in percent of the room charges.
pub const TAX_PERCENT: u64 = 11;

pub fn compute_summary(room: RoomId) -> PriceSummary {
    let entry = room.entry();
    let room_charges = entry.price * u64::from(NIGHTS);
    let tax = round_percent(room_charges, TAX_PERCENT);

    PriceSummary {
        room,
        room_name: entry.name.to_string(),
        nightly_price: entry.price,
        nights: NIGHTS,
        room_charges,
        tax,
        total: room_charges + tax,
    }
}

/// `amount * percent / 100` rounded half up.
fn round_percent(amount: u64, percent: u64) -> u64 {
    (amount * percent + 50) / 100
}

/// Formats an amount the way the site shows prices: `Rp` followed by the
/// amount grouped in thousands with `.`.
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp{grouped}")
}

/// Display strings for a [`PriceSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub room_name: String,
    pub nightly_price: String,
    pub room_charges: String,
    pub tax: String,
    pub total: String,
}

impl From<&PriceSummary> for SummaryView {
    fn from(summary: &PriceSummary) -> Self {
        Self {
            room_name: summary.room_name.clone(),
            nightly_price: format_rupiah(summary.nightly_price),
            room_charges: format_rupiah(summary.room_charges),
            tax: format_rupiah(summary.tax),
            total: format_rupiah(summary.total),
        }
    }
}

#[cfg(test)]
#[path = "tests/pricing_tests.rs"]
mod tests;
