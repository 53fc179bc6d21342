//! Navbar reactions to scrolling: the `scrolled` style, hide-on-scroll-down,
//! and highlighting the nav link of the section in view.

use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

/// Below this offset the navbar never hides.
pub const HIDE_AFTER: f64 = 100.0;
/// A section counts as current once its top is this close to the viewport top.
pub const SECTION_LOOKAHEAD: f64 = 150.0;

const HIDDEN_TRANSFORM: &str = "translateY(-100%)";
const SHOWN_TRANSFORM: &str = "translateY(0)";

pub struct NavbarScroll {
    navbar: NodeId,
    threshold: f64,
    last_scroll_top: f64,
}

impl NavbarScroll {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        let navbar = ctx.doc.get("navbar")?;
        let mut binding = Self {
            navbar,
            threshold: ctx.options.scroll_threshold,
            last_scroll_top: ctx.doc.scroll_y(),
        };
        binding.update_scrolled_class(ctx.doc);
        Some(binding)
    }

    fn update_scrolled_class(&mut self, doc: &mut Document) {
        if doc.scroll_y() > self.threshold {
            doc.add_class(self.navbar, "scrolled");
        } else {
            doc.remove_class(self.navbar, "scrolled");
        }
    }

    fn update_visibility(&mut self, doc: &mut Document, scroll_top: f64) {
        let transform = if scroll_top > self.last_scroll_top && scroll_top > HIDE_AFTER {
            HIDDEN_TRANSFORM
        } else {
            SHOWN_TRANSFORM
        };
        doc.set_style(self.navbar, "transform", transform);
        self.last_scroll_top = scroll_top;
    }

    fn update_active_link(&self, doc: &mut Document, scroll_top: f64) {
        let current = doc
            .query_tag("section")
            .into_iter()
            .filter_map(|section| doc.element(section))
            .filter(|el| scroll_top >= el.offset_top() - SECTION_LOOKAHEAD)
            .filter_map(|el| el.id().map(str::to_string))
            .last()
            .unwrap_or_default();
        let target = format!("#{current}");

        for link in doc.query_class("nav-link") {
            doc.remove_class(link, "active");
            doc.remove_class(link, "text-gold");
            if doc.attr(link, "href") == Some(target.as_str()) {
                doc.add_class(link, "active");
                doc.add_class(link, "text-gold");
            }
        }
    }
}

impl Behavior for NavbarScroll {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        if let PageEvent::Scroll { y } = event {
            self.update_scrolled_class(ctx.doc);
            self.update_visibility(ctx.doc, *y);
            self.update_active_link(ctx.doc, *y);
        }
        Flow::Continue
    }
}
