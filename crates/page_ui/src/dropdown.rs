//! The signed-in user's dropdown menu in the navbar.

use std::time::Duration;

use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    timers::{TimeoutHandle, TimerKey},
    Behavior, PageCtx,
};

pub const FADE_IN_DELAY: Duration = Duration::from_millis(10);
pub const TRANSITION: Duration = Duration::from_millis(200);

pub struct UserDropdown {
    button: NodeId,
    menu: NodeId,
    open: bool,
    fade_in: Option<TimeoutHandle>,
    hide: Option<TimeoutHandle>,
}

impl UserDropdown {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        let button = ctx.doc.get("userDropdownButton")?;
        let menu = ctx.doc.get("userDropdownMenu")?;
        let open = ctx.doc.has_class(menu, "show");
        Some(Self {
            button,
            menu,
            open,
            fade_in: None,
            hide: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn rotate_arrow(&self, doc: &mut Document, degrees: u32) {
        let arrows = doc.query_within(self.button, |el| el.has_class("fa-chevron-down"));
        for arrow in arrows {
            doc.set_style(arrow, "transform", format!("rotate({degrees}deg)"));
            doc.set_style(arrow, "transition", "transform 0.3s ease");
        }
    }

    fn show(&mut self, ctx: &mut PageCtx<'_>) {
        if let Some(pending) = self.hide.take() {
            pending.cancel();
        }
        self.open = true;
        let doc = &mut *ctx.doc;
        doc.add_class(self.menu, "show");
        doc.set_style(self.menu, "opacity", "0");
        doc.set_style(self.menu, "transform", "translateY(-10px)");
        self.rotate_arrow(doc, 180);
        self.fade_in = Some(ctx.timers.schedule(FADE_IN_DELAY, TimerKey::DropdownFadeIn));
    }

    fn hide(&mut self, ctx: &mut PageCtx<'_>) {
        if let Some(pending) = self.fade_in.take() {
            pending.cancel();
        }
        self.open = false;
        let doc = &mut *ctx.doc;
        doc.set_style(self.menu, "opacity", "0");
        doc.set_style(self.menu, "transform", "translateY(-10px)");
        self.rotate_arrow(doc, 0);
        if self.hide.is_none() {
            self.hide = Some(ctx.timers.schedule(TRANSITION, TimerKey::DropdownHide));
        }
    }
}

impl Behavior for UserDropdown {
    fn name(&self) -> &'static str {
        "user_dropdown"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        match event {
            PageEvent::Click { target } if ctx.doc.contains(self.button, *target) => {
                if self.open {
                    self.hide(ctx);
                } else {
                    self.show(ctx);
                }
                Flow::PreventDefault
            }
            PageEvent::Click { target } => {
                if self.open && !ctx.doc.contains(self.menu, *target) {
                    self.hide(ctx);
                }
                Flow::Continue
            }
            event if event.is_escape() && self.open => {
                self.hide(ctx);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_timer(&mut self, key: TimerKey, ctx: &mut PageCtx<'_>) {
        match key {
            TimerKey::DropdownFadeIn => {
                self.fade_in = None;
                ctx.doc.set_style(self.menu, "opacity", "1");
                ctx.doc.set_style(self.menu, "transform", "translateY(0)");
                ctx.doc.set_style(
                    self.menu,
                    "transition",
                    format!(
                        "opacity {ms}ms ease, transform {ms}ms ease",
                        ms = TRANSITION.as_millis()
                    ),
                );
            }
            TimerKey::DropdownHide => {
                self.hide = None;
                if !self.open {
                    ctx.doc.remove_class(self.menu, "show");
                }
            }
            _ => {}
        }
    }
}
