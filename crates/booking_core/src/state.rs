use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    domain::{PaymentMethod, RoomId, WizardStep},
    protocol::PriceSummary,
};

use crate::{dates::StayDates, pricing::compute_summary};

/// Everything the booking page remembers between events. Transitions take
/// the state by value and return the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub room: RoomId,
    pub payment_method: PaymentMethod,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
    pub checkout_min: Option<NaiveDate>,
    pub guests: u32,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Facilities,
            room: RoomId::Executive,
            payment_method: PaymentMethod::new(PaymentMethod::QRIS),
            checkin: None,
            checkout: None,
            checkout_min: None,
            guests: 1,
        }
    }
}

impl WizardState {
    pub fn with_room(self, room: RoomId) -> Self {
        Self { room, ..self }
    }

    pub fn with_payment_method(self, payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            ..self
        }
    }

    pub fn with_step(self, current_step: WizardStep) -> Self {
        Self {
            current_step,
            ..self
        }
    }

    pub fn with_stay(self, stay: StayDates) -> Self {
        Self {
            checkin: Some(stay.checkin),
            checkout: Some(stay.checkout),
            checkout_min: Some(stay.checkout_min),
            ..self
        }
    }

    /// A cleared check-in leaves checkout untouched.
    pub fn with_checkin(self, checkin: Option<NaiveDate>) -> Self {
        match checkin {
            Some(checkin) => self.with_stay(StayDates::with_checkin(checkin)),
            None => Self {
                checkin: None,
                ..self
            },
        }
    }

    pub fn with_checkout(self, checkout: Option<NaiveDate>) -> Self {
        Self { checkout, ..self }
    }

    pub fn with_guests(self, guests: u32) -> Self {
        Self { guests, ..self }
    }

    pub fn summary(&self) -> PriceSummary {
        compute_summary(self.room)
    }
}
