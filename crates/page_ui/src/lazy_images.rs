use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    document::NodeId,
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

/// Swaps `data-src` into `src` the first time an image becomes visible.
pub struct LazyImages {
    observed: BTreeSet<NodeId>,
}

impl LazyImages {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Self {
        let observed = ctx
            .doc
            .query(|el| el.tag() == "img" && el.has_attr("data-src"))
            .into_iter()
            .collect();
        Self { observed }
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

impl Behavior for LazyImages {
    fn name(&self) -> &'static str {
        "lazy_images"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        let PageEvent::BecameVisible { target } = event else {
            return Flow::Continue;
        };
        if !self.observed.remove(target) {
            return Flow::Continue;
        }
        let source = ctx.doc.attr(*target, "data-src").unwrap_or_default().to_string();
        debug!(src = %source, "loading lazy image");
        ctx.doc.set_attr(*target, "src", source);
        ctx.doc.add_class(*target, "loaded");
        Flow::Continue
    }
}
