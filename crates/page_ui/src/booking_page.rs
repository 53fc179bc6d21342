//! Binds the booking wizard to page events.

use anyhow::{bail, Context};
use booking_core::{dates::parse_input_date, BookingIdSource, BookingWizardController};
use chrono::Local;
use shared::{
    domain::RoomId,
    protocol::{BookingConfirmation, GuestDetails},
};
use tracing::{debug, warn};

use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    presenter::{DocumentPresenter, POPUP_ID},
    Behavior, PageCtx,
};

pub const CHECKIN_INPUT_ID: &str = "final-checkin";
pub const CHECKOUT_INPUT_ID: &str = "final-checkout";
pub const GUESTS_INPUT_ID: &str = "guests";
pub const TERMS_INPUT_ID: &str = "final-terms";
pub const PROOF_INPUT_ID: &str = "payment-proof";
pub const SUBMIT_BUTTON_ID: &str = "submit-booking";

pub struct BookingPage {
    wizard: BookingWizardController,
    last_confirmation: Option<BookingConfirmation>,
}

impl BookingPage {
    /// Returns `None` on pages without the wizard markup.
    pub fn attach(
        ctx: &mut PageCtx<'_>,
        ids: Box<dyn BookingIdSource>,
    ) -> anyhow::Result<Option<Self>> {
        let options = ctx.doc.query_class("room-option");
        if options.is_empty() && ctx.doc.get(CHECKIN_INPUT_ID).is_none() {
            return Ok(None);
        }
        for option in options {
            let Some(key) = ctx.doc.attr(option, "data-room") else {
                bail!("room option without a data-room attribute");
            };
            key.parse::<RoomId>()
                .with_context(|| format!("room option '{key}' is not in the catalog"))?;
        }

        let today = ctx
            .options
            .today
            .unwrap_or_else(|| Local::now().date_naive());
        let url = ctx.doc.location().clone();
        let mut wizard = BookingWizardController::with_id_source(ctx.options.wizard.clone(), ids);
        wizard.init(today, Some(&url), &mut DocumentPresenter::new(ctx.doc));

        Ok(Some(Self {
            wizard,
            last_confirmation: None,
        }))
    }

    pub fn wizard(&self) -> &BookingWizardController {
        &self.wizard
    }

    pub fn last_confirmation(&self) -> Option<&BookingConfirmation> {
        self.last_confirmation.as_ref()
    }

    fn on_click(&mut self, target: NodeId, doc: &mut Document) -> Flow {
        if self.wizard.is_confirmation_open() {
            if doc
                .closest(target, |el| el.attr("data-action") == Some("go-home"))
                .is_some()
            {
                self.wizard.go_home(&mut DocumentPresenter::new(doc));
                return Flow::PreventDefault;
            }
            let on_backdrop = doc.get(POPUP_ID) == Some(target);
            let on_close = doc
                .closest(target, |el| el.attr("data-action") == Some("close-popup"))
                .is_some();
            if on_backdrop || on_close {
                self.wizard.close_confirmation(&mut DocumentPresenter::new(doc));
                return Flow::PreventDefault;
            }
        }

        if let Some(option) = doc.closest(target, |el| {
            el.has_class("room-option") && el.has_attr("data-room")
        }) {
            let key = doc.attr(option, "data-room").unwrap_or_default().to_string();
            if let Err(err) = self
                .wizard
                .select_room_key(&key, &mut DocumentPresenter::new(doc))
            {
                warn!(error = %err, "room option ignored");
            }
            return Flow::Continue;
        }

        if let Some(option) = doc.closest(target, |el| {
            el.has_class("payment-method") && el.has_attr("data-method")
        }) {
            let method = doc.attr(option, "data-method").unwrap_or_default().to_string();
            self.wizard
                .select_payment_method(&method, &mut DocumentPresenter::new(doc));
            return Flow::Continue;
        }

        if let Some(trigger) = doc.closest(target, |el| el.has_attr("data-step")) {
            let raw = doc.attr(trigger, "data-step").unwrap_or_default();
            match raw.parse::<u8>() {
                Ok(step) => {
                    if let Err(err) = self
                        .wizard
                        .advance_to_step(step, &mut DocumentPresenter::new(doc))
                    {
                        warn!(error = %err, "step trigger ignored");
                    }
                }
                Err(_) => warn!(value = raw, "step trigger ignored"),
            }
            return Flow::PreventDefault;
        }

        if doc
            .closest(target, |el| el.id() == Some(SUBMIT_BUTTON_ID))
            .is_some()
        {
            let details = read_guest_details(doc);
            if let Ok(confirmation) = self.wizard.submit(&details, &mut DocumentPresenter::new(doc)) {
                self.last_confirmation = Some(confirmation);
            }
            return Flow::PreventDefault;
        }

        Flow::Continue
    }

    fn on_field(&mut self, target: NodeId, value: &str, doc: &mut Document) {
        let id = doc.element(target).and_then(|el| el.id()).map(str::to_owned);
        match id.as_deref() {
            Some(CHECKIN_INPUT_ID) => {
                log_unparsed_date(value);
                self.wizard
                    .on_checkin_input(value, &mut DocumentPresenter::new(doc));
            }
            Some(CHECKOUT_INPUT_ID) => {
                log_unparsed_date(value);
                self.wizard
                    .on_checkout_input(value, &mut DocumentPresenter::new(doc));
            }
            Some(GUESTS_INPUT_ID) => match value.trim().parse::<u32>() {
                Ok(guests) => self
                    .wizard
                    .on_guests_changed(guests, &mut DocumentPresenter::new(doc)),
                Err(_) => debug!(value, "ignoring non-numeric guest count"),
            },
            _ => {}
        }
    }
}

fn log_unparsed_date(raw: &str) {
    if !raw.trim().is_empty() && parse_input_date(raw).is_none() {
        debug!(value = raw, "date input is not YYYY-MM-DD");
    }
}

/// Snapshot of the guest form at submission time.
pub fn read_guest_details(doc: &Document) -> GuestDetails {
    let payment_proof = doc
        .get(PROOF_INPUT_ID)
        .and_then(|input| doc.element(input))
        .and_then(|el| el.files().first().cloned());
    GuestDetails {
        first_name: doc.value_of("firstName").to_string(),
        last_name: doc.value_of("lastName").to_string(),
        email: doc.value_of("email").to_string(),
        phone: doc.value_of("phone").to_string(),
        terms_accepted: doc
            .get(TERMS_INPUT_ID)
            .is_some_and(|terms| doc.attr(terms, "checked").is_some()),
        payment_proof,
    }
}

impl Behavior for BookingPage {
    fn name(&self) -> &'static str {
        "booking_page"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        match event {
            PageEvent::Click { target } => self.on_click(*target, ctx.doc),
            PageEvent::KeyDown { .. } if event.is_escape() && self.wizard.is_confirmation_open() => {
                self.wizard
                    .close_confirmation(&mut DocumentPresenter::new(ctx.doc));
                Flow::Continue
            }
            PageEvent::Input { target, value } | PageEvent::Change { target, value } => {
                self.on_field(*target, value, ctx.doc);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }
}

#[cfg(test)]
#[path = "tests/booking_page_tests.rs"]
mod tests;
