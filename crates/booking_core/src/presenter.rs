//! Rendering boundary between the wizard and the page.

use chrono::NaiveDate;
use shared::{
    domain::{PaymentMethod, RoomId, WizardStep},
    error::ValidationError,
    protocol::BookingConfirmation,
};

use crate::{
    dates::{format_display_date, format_input_date},
    pricing::SummaryView,
};

/// Stay inputs and their formatted labels, ready to be written to the page.
/// A `None` value leaves the input as the guest left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayView {
    pub checkin_value: Option<String>,
    pub checkin_min: Option<String>,
    pub checkout_value: Option<String>,
    pub checkout_min: Option<String>,
    pub checkin_display: String,
    pub checkout_display: String,
}

impl StayView {
    pub fn new(
        checkin: Option<NaiveDate>,
        checkin_min: Option<NaiveDate>,
        checkout: Option<NaiveDate>,
        checkout_min: Option<NaiveDate>,
    ) -> Self {
        Self {
            checkin_value: checkin.map(format_input_date),
            checkin_min: checkin_min.map(format_input_date),
            checkout_value: checkout.map(format_input_date),
            checkout_min: checkout_min.map(format_input_date),
            checkin_display: format_display_date(checkin),
            checkout_display: format_display_date(checkout),
        }
    }
}

/// Applies wizard output to whatever shows the page.
pub trait Presenter {
    fn mark_room_selected(&mut self, room: RoomId);
    fn render_summary(&mut self, summary: &SummaryView);
    fn render_payment_method(&mut self, method: &PaymentMethod);
    /// Shows the section for `step`. Returns `false` and leaves the page
    /// untouched when that section does not exist.
    fn show_step(&mut self, step: WizardStep) -> bool;
    fn render_stay(&mut self, stay: &StayView);
    fn render_guests(&mut self, guests: u32);
    fn alert(&mut self, error: &ValidationError);
    fn open_confirmation(&mut self, confirmation: &BookingConfirmation);
    fn close_confirmation(&mut self);
    fn navigate(&mut self, path: &str);
}
