use crate::{
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

const HOME_PATHS: [&str; 3] = ["/", "/index", "/home"];

/// On the home page, home links scroll back to the top instead of reloading.
pub struct HomeLinks;

impl HomeLinks {
    pub fn attach(_ctx: &mut PageCtx<'_>) -> Self {
        Self
    }
}

impl Behavior for HomeLinks {
    fn name(&self) -> &'static str {
        "home_links"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        let PageEvent::Click { target } = event else {
            return Flow::Continue;
        };
        let doc = &mut *ctx.doc;
        let Some(link) = doc.closest(*target, |el| {
            el.tag() == "a"
                && el
                    .attr("href")
                    .is_some_and(|href| href == "/" || href.contains("index"))
        }) else {
            return Flow::Continue;
        };
        if !HOME_PATHS.contains(&doc.location().path()) {
            return Flow::Continue;
        }

        doc.scroll_to(0.0);
        for nav_link in doc.query_class("nav-link") {
            doc.remove_class(nav_link, "active");
        }
        doc.add_class(link, "active");
        Flow::PreventDefault
    }
}
