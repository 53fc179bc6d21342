//! Writes wizard output into the booking page.

use booking_core::{pricing::SummaryView, Presenter, StayView};
use shared::{
    domain::{PaymentMethod, RoomId, WizardStep},
    error::ValidationError,
    protocol::BookingConfirmation,
};

use crate::document::{Document, NodeId};

pub const POPUP_ID: &str = "bookingPopup";
pub const SELECTED_METHOD_INPUT_ID: &str = "selectedPaymentMethod";
/// Space kept above a section when the wizard scrolls to it.
pub const SECTION_SCROLL_OFFSET: f64 = 100.0;

pub struct DocumentPresenter<'a> {
    doc: &'a mut Document,
}

impl<'a> DocumentPresenter<'a> {
    pub fn new(doc: &'a mut Document) -> Self {
        Self { doc }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(node) = self.doc.get(id) {
            self.doc.set_text(node, text);
        }
    }

    fn set_input(&mut self, id: &str, value: Option<&str>, min: Option<&str>) {
        let Some(node) = self.doc.get(id) else {
            return;
        };
        if let Some(value) = value {
            self.doc.set_value(node, value);
        }
        if let Some(min) = min {
            self.doc.set_attr(node, "min", min);
        }
    }

    fn select_one(&mut self, class: &str, data_attr: &str, wanted: &str) {
        for node in self.doc.query_class(class) {
            if self.doc.attr(node, data_attr) == Some(wanted) {
                self.doc.add_class(node, "selected");
            } else {
                self.doc.remove_class(node, "selected");
            }
        }
    }

    fn section(&self, step: WizardStep) -> Option<NodeId> {
        self.doc.get(step.section_id())
    }
}

impl Presenter for DocumentPresenter<'_> {
    fn mark_room_selected(&mut self, room: RoomId) {
        self.select_one("room-option", "data-room", room.key());
    }

    fn render_summary(&mut self, summary: &SummaryView) {
        self.set_text("summary-room", &summary.room_name);
        self.set_text("summary-price", &summary.nightly_price);
        self.set_text("summary-charges", &summary.room_charges);
        self.set_text("summary-tax", &summary.tax);
        self.set_text("summary-total", &summary.total);
        self.set_text("final-room", &summary.room_name);
        self.set_text("final-total", &summary.total);
    }

    fn render_payment_method(&mut self, method: &PaymentMethod) {
        self.select_one("payment-method", "data-method", method.as_str());
        if let Some(input) = self.doc.get(SELECTED_METHOD_INPUT_ID) {
            self.doc.set_value(input, method.as_str());
        }
        self.set_text("final-payment", &method.display_label());
    }

    fn show_step(&mut self, step: WizardStep) -> bool {
        let Some(target) = self.section(step) else {
            return false;
        };

        for other in WizardStep::ALL {
            if let Some(section) = self.section(other) {
                self.doc.add_class(section, "section-hidden");
                self.doc.remove_class(section, "section-active");
            }
        }
        self.doc.remove_class(target, "section-hidden");
        self.doc.add_class(target, "section-active");

        for (index, indicator) in self.doc.query_class("progress-step").into_iter().enumerate() {
            let number = index + 1;
            let current = usize::from(step.number());
            self.doc.remove_class(indicator, "active");
            self.doc.remove_class(indicator, "completed");
            if number < current {
                self.doc.add_class(indicator, "completed");
            } else if number == current {
                self.doc.add_class(indicator, "active");
            }
        }
        if let Some(bar) = self.doc.get("progress-bar") {
            self.doc
                .set_style(bar, "width", format!("{}%", step.progress_percent()));
        }

        let top = self
            .doc
            .element(target)
            .map(|el| el.offset_top())
            .unwrap_or_default();
        self.doc.scroll_to(top - SECTION_SCROLL_OFFSET);
        true
    }

    fn render_stay(&mut self, stay: &StayView) {
        self.set_input(
            "final-checkin",
            stay.checkin_value.as_deref(),
            stay.checkin_min.as_deref(),
        );
        self.set_input(
            "final-checkout",
            stay.checkout_value.as_deref(),
            stay.checkout_min.as_deref(),
        );
        self.set_text("final-checkin-display", &stay.checkin_display);
        self.set_text("final-checkout-display", &stay.checkout_display);
    }

    fn render_guests(&mut self, guests: u32) {
        self.set_text("final-guests", &guests.to_string());
    }

    fn alert(&mut self, error: &ValidationError) {
        self.doc.alert(error.to_string());
        if let Some(field) = error.focus_target().and_then(|id| self.doc.get(id)) {
            self.doc.focus(field);
        }
    }

    fn open_confirmation(&mut self, confirmation: &BookingConfirmation) {
        self.set_text("popupBookingId", &confirmation.booking_id);
        self.set_text("popupRoom", &confirmation.room_name);
        self.set_text("popupCheckin", &confirmation.checkin_display);
        self.set_text("popupCheckout", &confirmation.checkout_display);
        self.set_text("popupGuests", &confirmation.guests_display);
        self.set_text("popupTotal", &confirmation.total_display);
        if let Some(popup) = self.doc.get(POPUP_ID) {
            self.doc.add_class(popup, "active");
        }
        let body = self.doc.body();
        self.doc.set_style(body, "overflow", "hidden");
    }

    fn close_confirmation(&mut self) {
        if let Some(popup) = self.doc.get(POPUP_ID) {
            self.doc.remove_class(popup, "active");
        }
        let body = self.doc.body();
        self.doc.set_style(body, "overflow", "");
    }

    fn navigate(&mut self, path: &str) {
        self.doc.navigate(path);
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
