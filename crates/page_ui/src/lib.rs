//! Page behaviors for the hotel site, driven by [`PageEvent`]s against an
//! in-memory [`Document`].

use std::time::Duration;

use booking_core::WizardOptions;
use chrono::NaiveDate;

pub mod app;
pub mod booking_page;
pub mod contact_form;
pub mod document;
pub mod dropdown;
pub mod events;
pub mod form_helpers;
pub mod home_links;
pub mod lazy_images;
pub mod leave_guard;
pub mod mobile_menu;
pub mod navbar;
pub mod notifications;
pub mod payment_form;
pub mod presenter;
pub mod scaffold;
pub mod smooth_scroll;
pub mod submit_guard;
pub mod timers;

pub use app::PageApp;
pub use document::{Document, NodeId};
pub use events::{Flow, PageEvent};
pub use notifications::{NotificationKind, Notifications};
pub use timers::{TimerKey, Timeouts};

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);
pub const DEFAULT_SUBMIT_SAFETY_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 20.0;
pub const DEFAULT_LEAVE_REDIRECT_PATH: &str = "/rooms";

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub wizard: WizardOptions,
    pub notification_duration: Duration,
    pub submit_safety_timeout: Duration,
    pub scroll_threshold: f64,
    pub leave_redirect_path: String,
    /// Date the booking page treats as today; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            wizard: WizardOptions::default(),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            submit_safety_timeout: DEFAULT_SUBMIT_SAFETY_TIMEOUT,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            leave_redirect_path: DEFAULT_LEAVE_REDIRECT_PATH.into(),
            today: None,
        }
    }
}

/// What a behavior gets to touch while handling an event or a timer.
pub struct PageCtx<'a> {
    pub doc: &'a mut Document,
    pub timers: &'a Timeouts,
    pub notifications: &'a mut Notifications,
    pub options: &'a UiOptions,
}

impl PageCtx<'_> {
    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> NodeId {
        self.notifications
            .show(self.doc, self.timers, message, kind)
    }
}

/// A page binding that reacts to events and to its own timers.
pub trait Behavior {
    fn name(&self) -> &'static str;

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow;

    fn on_timer(&mut self, _key: TimerKey, _ctx: &mut PageCtx<'_>) {}
}
