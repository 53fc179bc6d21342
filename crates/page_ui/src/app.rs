//! Page bootstrap and the event loop that feeds host events and timer fires
//! to every component.

use std::time::Duration;

use anyhow::Context;
use booking_core::{BookingIdSource, RandomBookingIds};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info};

use crate::{
    booking_page::BookingPage,
    contact_form::ContactForm,
    document::Document,
    dropdown::UserDropdown,
    events::{Flow, PageEvent},
    form_helpers::FormHelpers,
    home_links::HomeLinks,
    lazy_images::LazyImages,
    leave_guard::LeaveGuard,
    mobile_menu::MobileMenu,
    navbar::NavbarScroll,
    notifications::Notifications,
    payment_form::PaymentFormGuard,
    smooth_scroll::SmoothScroll,
    submit_guard::FormSubmissionGuard,
    timers::{Expired, TimerKey, Timeouts},
    Behavior, PageCtx, UiOptions,
};

/// Delay before the body gets the `initialized` class.
pub const INITIALIZED_DELAY: Duration = Duration::from_millis(50);

fn boxed<B: Behavior + 'static>(behavior: B) -> Box<dyn Behavior> {
    Box::new(behavior)
}

pub struct PageApp {
    doc: Document,
    options: UiOptions,
    timers: Timeouts,
    expired: UnboundedReceiver<Expired>,
    notifications: Notifications,
    booking: Option<BookingPage>,
    behaviors: Vec<Box<dyn Behavior>>,
}

impl PageApp {
    /// Must be called from within a tokio runtime.
    pub fn start(doc: Document, options: UiOptions) -> Self {
        Self::start_with_ids(doc, options, Box::new(RandomBookingIds))
    }

    pub fn start_with_ids(doc: Document, options: UiOptions, ids: Box<dyn BookingIdSource>) -> Self {
        let (timers, expired) = Timeouts::new();
        let notifications = Notifications::new(options.notification_duration);
        let mut app = Self {
            doc,
            options,
            timers,
            expired,
            notifications,
            booking: None,
            behaviors: Vec::new(),
        };

        app.reveal_body();
        app.timers
            .schedule(INITIALIZED_DELAY, TimerKey::BodyInitialized);

        match app.attach_components(ids) {
            Ok(()) => info!(
                path = app.doc.location().path(),
                components = ?app.components(),
                "page initialized"
            ),
            Err(err) => {
                error!(error = ?err, "page initialization failed");
                app.reveal_body();
            }
        }
        app
    }

    fn reveal_body(&mut self) {
        let body = self.doc.body();
        self.doc.set_style(body, "opacity", "1");
        self.doc.set_style(body, "visibility", "visible");
    }

    fn attach_components(&mut self, ids: Box<dyn BookingIdSource>) -> anyhow::Result<()> {
        let mut ctx = PageCtx {
            doc: &mut self.doc,
            timers: &self.timers,
            notifications: &mut self.notifications,
            options: &self.options,
        };
        ctx.notifications.adopt_existing(ctx.doc, ctx.timers);

        let attached = [
            Some(boxed(FormSubmissionGuard::attach(&mut ctx))),
            PaymentFormGuard::attach(&mut ctx).map(boxed),
            LeaveGuard::attach(&mut ctx).map(boxed),
            NavbarScroll::attach(&mut ctx).map(boxed),
            MobileMenu::attach(&mut ctx).map(boxed),
            Some(boxed(SmoothScroll::attach(&mut ctx))),
            Some(boxed(HomeLinks::attach(&mut ctx))),
            UserDropdown::attach(&mut ctx).map(boxed),
            Some(boxed(LazyImages::attach(&mut ctx))),
            Some(boxed(FormHelpers::attach(&mut ctx))),
            ContactForm::attach(&mut ctx).map(boxed),
        ];
        self.behaviors.extend(attached.into_iter().flatten());

        self.booking = BookingPage::attach(&mut ctx, ids).context("booking wizard")?;
        Ok(())
    }

    /// Names of the attached components, in dispatch order.
    pub fn components(&self) -> Vec<&'static str> {
        self.booking
            .iter()
            .map(|booking| booking.name())
            .chain(self.behaviors.iter().map(|behavior| behavior.name()))
            .collect()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn booking(&self) -> Option<&BookingPage> {
        self.booking.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Applies what the host already changed (field values, scroll offset),
    /// then lets every component react. Form resets requested along the way
    /// are dispatched afterwards. Returns whether any component cancelled the
    /// default action.
    pub fn dispatch(&mut self, event: PageEvent) -> Flow {
        let flow = self.dispatch_one(event);
        for form in self.doc.take_resets() {
            self.dispatch(PageEvent::Reset { form });
        }
        flow
    }

    fn dispatch_one(&mut self, event: PageEvent) -> Flow {
        debug!(event = event.name(), "page event");
        self.apply_host_state(&event);

        let mut ctx = PageCtx {
            doc: &mut self.doc,
            timers: &self.timers,
            notifications: &mut self.notifications,
            options: &self.options,
        };
        if let PageEvent::Click { target } = event {
            if ctx.notifications.handle_click(ctx.doc, ctx.timers, target) {
                return Flow::Continue;
            }
        }

        let mut flow = Flow::Continue;
        if let Some(booking) = self.booking.as_mut() {
            flow = flow.merge(booking.on_event(&event, &mut ctx));
        }
        for behavior in &mut self.behaviors {
            flow = flow.merge(behavior.on_event(&event, &mut ctx));
        }
        flow
    }

    fn apply_host_state(&mut self, event: &PageEvent) {
        match event {
            PageEvent::Input { target, value } | PageEvent::Change { target, value } => {
                let is_checkbox = self.doc.attr(*target, "type") == Some("checkbox");
                if is_checkbox {
                    if value.is_empty() || value == "false" {
                        self.doc.remove_attr(*target, "checked");
                    } else {
                        self.doc.set_attr(*target, "checked", "");
                    }
                } else {
                    self.doc.set_value(*target, value.clone());
                }
            }
            PageEvent::Scroll { y } => self.doc.scroll_to(*y),
            _ => {}
        }
    }

    fn handle_expired(&mut self, expired: Expired) {
        if expired.is_cancelled() {
            return;
        }
        let key = expired.key();
        let mut ctx = PageCtx {
            doc: &mut self.doc,
            timers: &self.timers,
            notifications: &mut self.notifications,
            options: &self.options,
        };
        match key {
            TimerKey::BodyInitialized => {
                let body = ctx.doc.body();
                ctx.doc.add_class(body, "initialized");
            }
            TimerKey::NotificationFade(_) | TimerKey::NotificationRemove(_) => {
                ctx.notifications.on_timer(ctx.doc, ctx.timers, key);
            }
            _ => {
                for behavior in &mut self.behaviors {
                    behavior.on_timer(key, &mut ctx);
                }
            }
        }
    }

    /// Handles every timer that fires within `by`.
    pub async fn advance(&mut self, by: Duration) {
        let deadline = tokio::time::Instant::now() + by;
        loop {
            tokio::select! {
                biased;
                Some(expired) = self.expired.recv() => self.handle_expired(expired),
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
    }

    /// Drives the page until the host closes its event channel.
    pub async fn run(mut self, mut events: UnboundedReceiver<PageEvent>) -> Document {
        loop {
            tokio::select! {
                Some(expired) = self.expired.recv() => self.handle_expired(expired),
                event = events.recv() => match event {
                    Some(event) => {
                        self.dispatch(event);
                    }
                    None => break,
                },
            }
        }
        debug!("page event channel closed");
        self.doc
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
