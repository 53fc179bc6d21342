use chrono::NaiveDate;
use shared::{
    domain::{PaymentMethod, RoomId, WizardStep},
    error::{StepOutOfRange, UnknownRoom, ValidationError},
    protocol::{BookingConfirmation, GuestDetails, PriceSummary},
};
use tracing::{debug, info};
use url::Url;

pub mod booking_id;
pub mod dates;
pub mod presenter;
pub mod pricing;
mod state;
pub mod validation;

pub use booking_id::{BookingIdSource, FixedBookingIds, RandomBookingIds};
pub use presenter::{Presenter, StayView};
pub use state::WizardState;
pub use validation::ProofPolicy;

use booking_id::{generate_booking_id, DEFAULT_BOOKING_ID_PREFIX};
use dates::{
    format_display_date, format_display_input, guests_label, parse_input_date, StayDates,
};
use pricing::{format_rupiah, SummaryView};
use validation::{validate_booking, BookingSubmission};

/// Query parameter that preselects a room when the booking page opens.
pub const ROOM_QUERY_PARAM: &str = "room";
pub const DEFAULT_HOME_PATH: &str = "index.html";

#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub proof_policy: ProofPolicy,
    pub booking_id_prefix: String,
    pub home_path: String,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            proof_policy: ProofPolicy::default(),
            booking_id_prefix: DEFAULT_BOOKING_ID_PREFIX.into(),
            home_path: DEFAULT_HOME_PATH.into(),
        }
    }
}

/// Owns the booking wizard for one page session and pushes every change
/// through a [`Presenter`].
pub struct BookingWizardController {
    state: WizardState,
    checkin_min: Option<NaiveDate>,
    options: WizardOptions,
    ids: Box<dyn BookingIdSource>,
    confirmation_open: bool,
}

impl BookingWizardController {
    pub fn new(options: WizardOptions) -> Self {
        Self::with_id_source(options, Box::new(RandomBookingIds))
    }

    pub fn with_id_source(options: WizardOptions, ids: Box<dyn BookingIdSource>) -> Self {
        Self {
            state: WizardState::default(),
            checkin_min: None,
            options,
            ids,
            confirmation_open: false,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.confirmation_open
    }

    /// First render of the booking page: summary for the default room, stay
    /// defaults, QRIS as payment method, then the room from `page_url`.
    pub fn init(&mut self, today: NaiveDate, page_url: Option<&Url>, presenter: &mut dyn Presenter) {
        presenter.mark_room_selected(self.state.room);
        self.render_summary(presenter);
        self.initialize_date_defaults(today, presenter);
        self.select_payment_method(PaymentMethod::QRIS, presenter);
        if let Some(url) = page_url {
            self.preselect_from_url(url, presenter);
        }
        info!(room = %self.state.room, "booking wizard initialized");
    }

    pub fn compute_summary(&self) -> PriceSummary {
        self.state.summary()
    }

    pub fn select_room(&mut self, room: RoomId, presenter: &mut dyn Presenter) {
        self.state = std::mem::take(&mut self.state).with_room(room);
        presenter.mark_room_selected(room);
        self.render_summary(presenter);
        debug!(room = %room, "room selected");
    }

    pub fn select_room_key(
        &mut self,
        key: &str,
        presenter: &mut dyn Presenter,
    ) -> Result<RoomId, UnknownRoom> {
        let room = key.parse::<RoomId>()?;
        self.select_room(room, presenter);
        Ok(room)
    }

    pub fn select_payment_method(&mut self, method: &str, presenter: &mut dyn Presenter) {
        let method = PaymentMethod::new(method);
        presenter.render_payment_method(&method);
        debug!(method = %method, "payment method selected");
        self.state = std::mem::take(&mut self.state).with_payment_method(method);
    }

    pub fn advance_to_step(
        &mut self,
        step: u8,
        presenter: &mut dyn Presenter,
    ) -> Result<bool, StepOutOfRange> {
        let step = WizardStep::try_from(step)?;
        Ok(self.go_to_step(step, presenter))
    }

    /// Returns whether the step was shown.
    pub fn go_to_step(&mut self, step: WizardStep, presenter: &mut dyn Presenter) -> bool {
        if !presenter.show_step(step) {
            debug!(section = step.section_id(), "wizard section missing; step ignored");
            return false;
        }
        self.state = std::mem::take(&mut self.state).with_step(step);
        debug!(step = step.number(), "wizard step shown");
        true
    }

    pub fn initialize_date_defaults(&mut self, today: NaiveDate, presenter: &mut dyn Presenter) {
        self.checkin_min = Some(today);
        self.state = std::mem::take(&mut self.state).with_stay(StayDates::starting(today));
        self.render_stay(presenter);
    }

    pub fn on_checkin_changed(&mut self, checkin: Option<NaiveDate>, presenter: &mut dyn Presenter) {
        self.state = std::mem::take(&mut self.state).with_checkin(checkin);
        self.render_stay(presenter);
    }

    pub fn on_checkout_changed(
        &mut self,
        checkout: Option<NaiveDate>,
        presenter: &mut dyn Presenter,
    ) {
        self.state = std::mem::take(&mut self.state).with_checkout(checkout);
        self.render_stay(presenter);
    }

    /// Check-in text as typed into the page. Text that is not a date counts
    /// as no check-in and is shown unchanged.
    pub fn on_checkin_input(&mut self, raw: &str, presenter: &mut dyn Presenter) {
        let checkin = parse_input_date(raw);
        self.state = std::mem::take(&mut self.state).with_checkin(checkin);
        let mut stay = self.stay_view();
        stay.checkin_display = format_display_input(raw);
        presenter.render_stay(&stay);
    }

    pub fn on_checkout_input(&mut self, raw: &str, presenter: &mut dyn Presenter) {
        let checkout = parse_input_date(raw);
        self.state = std::mem::take(&mut self.state).with_checkout(checkout);
        let mut stay = self.stay_view();
        stay.checkout_display = format_display_input(raw);
        presenter.render_stay(&stay);
    }

    pub fn on_guests_changed(&mut self, guests: u32, presenter: &mut dyn Presenter) {
        self.state = std::mem::take(&mut self.state).with_guests(guests);
        presenter.render_guests(guests);
    }

    /// Selects the room named by the `room` query parameter when it is a
    /// catalog key; anything else is ignored.
    pub fn preselect_from_url(&mut self, url: &Url, presenter: &mut dyn Presenter) -> Option<RoomId> {
        let (_, value) = url
            .query_pairs()
            .find(|(key, _)| key == ROOM_QUERY_PARAM)?;
        match value.parse::<RoomId>() {
            Ok(room) => {
                self.select_room(room, presenter);
                Some(room)
            }
            Err(err) => {
                debug!(error = %err, "ignoring room query parameter");
                None
            }
        }
    }

    /// Runs the submission checks; on success opens the confirmation popup.
    pub fn submit(
        &mut self,
        details: &GuestDetails,
        presenter: &mut dyn Presenter,
    ) -> Result<BookingConfirmation, ValidationError> {
        let submission = BookingSubmission {
            details,
            payment_method: &self.state.payment_method,
            checkin: self.state.checkin,
            checkout: self.state.checkout,
        };
        let stay = match validate_booking(submission, self.options.proof_policy) {
            Ok(stay) => stay,
            Err(err) => {
                info!(code = ?err.code(), "booking submission rejected");
                presenter.alert(&err);
                return Err(err);
            }
        };

        let summary = self.compute_summary();
        let confirmation = BookingConfirmation {
            booking_id: generate_booking_id(&self.options.booking_id_prefix, self.ids.as_mut()),
            room_name: summary.room_name,
            checkin_display: format_display_date(Some(stay.checkin)),
            checkout_display: format_display_date(Some(stay.checkout)),
            guests: self.state.guests,
            guests_display: guests_label(self.state.guests),
            total_display: format_rupiah(summary.total),
        };

        presenter.open_confirmation(&confirmation);
        self.confirmation_open = true;
        info!(
            booking_id = %confirmation.booking_id,
            room = %self.state.room,
            method = %self.state.payment_method,
            "booking confirmed"
        );
        Ok(confirmation)
    }

    pub fn close_confirmation(&mut self, presenter: &mut dyn Presenter) {
        presenter.close_confirmation();
        self.confirmation_open = false;
    }

    pub fn go_home(&mut self, presenter: &mut dyn Presenter) {
        self.close_confirmation(presenter);
        presenter.navigate(&self.options.home_path);
    }

    fn render_summary(&self, presenter: &mut dyn Presenter) {
        presenter.render_summary(&SummaryView::from(&self.compute_summary()));
    }

    fn stay_view(&self) -> StayView {
        StayView::new(
            self.state.checkin,
            self.checkin_min,
            self.state.checkout,
            self.state.checkout_min,
        )
    }

    fn render_stay(&self, presenter: &mut dyn Presenter) {
        presenter.render_stay(&self.stay_view());
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
