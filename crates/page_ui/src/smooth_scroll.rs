//! In-page anchor navigation and the initial `#hash` jump.

use std::time::Duration;

use tracing::debug;

use crate::{
    document::Document,
    events::{Flow, PageEvent},
    mobile_menu,
    timers::TimerKey,
    Behavior, PageCtx,
};

pub const DEFAULT_NAVBAR_HEIGHT: f64 = 80.0;
pub const HASH_SCROLL_DELAY: Duration = Duration::from_millis(100);

pub struct SmoothScroll;

impl SmoothScroll {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Self {
        if ctx.doc.location().fragment().is_some_and(|f| !f.is_empty()) {
            ctx.timers.schedule(HASH_SCROLL_DELAY, TimerKey::ScrollToHash);
        }
        Self
    }
}

fn navbar_height(doc: &Document) -> f64 {
    doc.get("navbar")
        .and_then(|navbar| doc.element(navbar))
        .map(|el| el.offset_height())
        .filter(|height| *height > 0.0)
        .unwrap_or(DEFAULT_NAVBAR_HEIGHT)
}

impl Behavior for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth_scroll"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        let PageEvent::Click { target } = event else {
            return Flow::Continue;
        };
        let doc = &mut *ctx.doc;
        let Some(anchor) = doc.closest(*target, |el| {
            el.tag() == "a" && el.attr("href").is_some_and(|href| href.starts_with('#'))
        }) else {
            return Flow::Continue;
        };
        let href = doc.attr(anchor, "href").unwrap_or_default().to_string();
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Flow::Continue;
        };
        let Some(section) = doc.get(id) else {
            return Flow::Continue;
        };

        let top = doc.element(section).map(|el| el.offset_top()).unwrap_or_default();
        let offset = top - navbar_height(doc);
        doc.scroll_to(offset);

        let mut url = doc.location().clone();
        url.set_fragment(Some(id));
        doc.push_history(url);
        mobile_menu::collapse(doc);
        debug!(section = id, "scrolled to anchor");
        Flow::PreventDefault
    }

    fn on_timer(&mut self, key: TimerKey, ctx: &mut PageCtx<'_>) {
        if key != TimerKey::ScrollToHash {
            return;
        }
        let doc = &mut *ctx.doc;
        let Some(id) = doc.location().fragment().map(str::to_string) else {
            return;
        };
        if let Some(top) = doc
            .get(&id)
            .and_then(|section| doc.element(section))
            .map(|el| el.offset_top())
        {
            doc.scroll_to(top - DEFAULT_NAVBAR_HEIGHT);
        }
    }
}
