//! Stay date defaults and the display formats used on the booking page.

use chrono::{Days, NaiveDate};

/// Value format of `<input type="date">`.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%-d %b %Y";
const EMPTY_DISPLAY_DATE: &str = "--/--/----";

pub const DEFAULT_STAY_DAYS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    /// Earliest date the checkout input accepts.
    pub checkout_min: NaiveDate,
}

impl StayDates {
    /// Check-in today, check-out two days later.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            checkin: today,
            checkout: add_days(today, DEFAULT_STAY_DAYS),
            checkout_min: add_days(today, 1),
        }
    }

    /// A new check-in date always pulls checkout to the following day.
    pub fn with_checkin(checkin: NaiveDate) -> Self {
        let next_day = add_days(checkin, 1);
        Self {
            checkin,
            checkout: next_day,
            checkout_min: next_day,
        }
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), INPUT_DATE_FORMAT).ok()
}

pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => EMPTY_DISPLAY_DATE.to_string(),
    }
}

/// Like [`format_display_date`] for a raw input value; text that is not a
/// date is shown unchanged.
pub fn format_display_input(raw: &str) -> String {
    if raw.trim().is_empty() {
        return EMPTY_DISPLAY_DATE.to_string();
    }
    match parse_input_date(raw) {
        Some(date) => format_display_date(Some(date)),
        None => raw.to_string(),
    }
}

pub fn guests_label(guests: u32) -> String {
    if guests == 1 {
        "1 Guest".to_string()
    } else {
        format!("{guests} Guests")
    }
}

#[cfg(test)]
#[path = "tests/dates_tests.rs"]
mod tests;
