//! Toast notifications and server-rendered flash messages that fade out on
//! their own.

use std::{collections::HashMap, time::Duration};

use tracing::debug;

use crate::{
    document::{Document, NodeId},
    timers::{TimeoutHandle, TimerKey, Timeouts},
};

/// Length of the fade before a dismissed message is removed.
pub const FADE_OUT: Duration = Duration::from_millis(300);

const TOAST_CLASSES: &str = "fixed top-4 right-4 p-4 rounded-lg shadow-lg z-50 animate-fadeInDown";
const FLASH_CLASSES: [&str; 3] = ["alert", "flash-message", "notification"];
const FADE_TRANSITION: &str = "opacity 0.3s ease, transform 0.3s ease";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn color_classes(self) -> &'static str {
        match self {
            NotificationKind::Error => "bg-red-100 text-red-800 border-l-4 border-red-500",
            NotificationKind::Success => "bg-green-100 text-green-800 border-l-4 border-green-500",
            NotificationKind::Warning => "bg-yellow-100 text-yellow-800 border-l-4 border-yellow-500",
            NotificationKind::Info => "bg-blue-100 text-blue-800 border-l-4 border-blue-500",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Error => "fa-exclamation-circle",
            NotificationKind::Success => "fa-check-circle",
            NotificationKind::Warning => "fa-exclamation-triangle",
            NotificationKind::Info => "fa-info-circle",
        }
    }
}

struct Toast {
    close_button: Option<NodeId>,
    auto_hide: Option<TimeoutHandle>,
    fading: bool,
}

pub struct Notifications {
    duration: Duration,
    live: HashMap<NodeId, Toast>,
}

impl Notifications {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            live: HashMap::new(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn show(
        &mut self,
        doc: &mut Document,
        timers: &Timeouts,
        message: &str,
        kind: NotificationKind,
    ) -> NodeId {
        let body = doc.body();
        let toast = doc
            .append(body, "div")
            .class(TOAST_CLASSES)
            .class(kind.color_classes())
            .attr("role", "status")
            .node();
        let row = doc.append(toast, "div").class("flex items-center").node();
        doc.append(row, "i").class("fas mr-3").class(kind.icon());
        doc.append(row, "p").class("font-medium").text(message);
        let close = doc
            .append(row, "button")
            .class("ml-4 text-gray-500 hover:text-gray-700 close-btn")
            .node();
        doc.append(close, "i").class("fas fa-times");

        debug!(?kind, message, "notification shown");
        self.track(toast, Some(close), timers);
        toast
    }

    /// Schedules auto-hide for messages already on the page.
    pub fn adopt_existing(&mut self, doc: &Document, timers: &Timeouts) {
        let flashes = doc.query(|el| FLASH_CLASSES.iter().any(|class| el.has_class(class)));
        for flash in flashes {
            if self.live.contains_key(&flash) {
                continue;
            }
            let close = doc
                .query_within(flash, |el| {
                    el.has_class("close-btn")
                        || el.has_class("alert-close")
                        || el.attr("data-dismiss") == Some("alert")
                })
                .into_iter()
                .next();
            self.track(flash, close, timers);
        }
    }

    fn track(&mut self, node: NodeId, close_button: Option<NodeId>, timers: &Timeouts) {
        let auto_hide = timers.schedule(self.duration, TimerKey::NotificationFade(node));
        self.live.insert(
            node,
            Toast {
                close_button,
                auto_hide: Some(auto_hide),
                fading: false,
            },
        );
    }

    /// Handles clicks on close buttons. Returns whether the click was used.
    pub fn handle_click(&mut self, doc: &mut Document, timers: &Timeouts, target: NodeId) -> bool {
        let hit = self.live.iter().find_map(|(node, toast)| {
            toast
                .close_button
                .filter(|close| doc.contains(*close, target))
                .map(|_| *node)
        });
        match hit {
            Some(node) => {
                self.dismiss(doc, timers, node);
                true
            }
            None => false,
        }
    }

    pub fn on_timer(&mut self, doc: &mut Document, timers: &Timeouts, key: TimerKey) {
        match key {
            TimerKey::NotificationFade(node) => {
                if let Some(toast) = self.live.get_mut(&node) {
                    toast.auto_hide = None;
                }
                self.dismiss(doc, timers, node);
            }
            TimerKey::NotificationRemove(node) => {
                if self.live.remove(&node).is_some() {
                    doc.remove(node);
                }
            }
            _ => {}
        }
    }

    fn dismiss(&mut self, doc: &mut Document, timers: &Timeouts, node: NodeId) {
        let Some(toast) = self.live.get_mut(&node) else {
            return;
        };
        if toast.fading {
            return;
        }
        if let Some(pending) = toast.auto_hide.take() {
            pending.cancel();
        }
        toast.fading = true;
        if doc.element(node).is_none() {
            self.live.remove(&node);
            return;
        }
        doc.set_style(node, "transition", FADE_TRANSITION);
        doc.set_style(node, "opacity", "0");
        doc.set_style(node, "transform", "translateY(-10px)");
        timers.schedule(FADE_OUT, TimerKey::NotificationRemove(node));
    }
}

#[cfg(test)]
#[path = "tests/notifications_tests.rs"]
mod tests;
