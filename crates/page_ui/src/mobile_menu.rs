use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

pub const MENU_ICON_PATH: &str = "M4 6h16M4 12h16M4 18h16";
pub const CLOSE_ICON_PATH: &str = "M6 18L18 6M6 6l12 12";

pub struct MobileMenu {
    toggle: NodeId,
    menu: NodeId,
}

impl MobileMenu {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        Some(Self {
            toggle: ctx.doc.get("menuToggle")?,
            menu: ctx.doc.get("mobileMenu")?,
        })
    }

    fn is_open(&self, doc: &Document) -> bool {
        !doc.has_class(self.menu, "hidden")
    }
}

fn set_icon(doc: &mut Document, toggle: NodeId, path: &str) {
    if let Some(icon) = doc.query_within(toggle, |el| el.tag() == "svg").first() {
        doc.set_attr(*icon, "d", path);
    }
}

/// Hides the mobile menu if it is open. Used by in-page navigation as well.
pub fn collapse(doc: &mut Document) {
    let (Some(toggle), Some(menu)) = (doc.get("menuToggle"), doc.get("mobileMenu")) else {
        return;
    };
    if !doc.has_class(menu, "hidden") {
        doc.add_class(menu, "hidden");
        set_icon(doc, toggle, MENU_ICON_PATH);
    }
}

impl Behavior for MobileMenu {
    fn name(&self) -> &'static str {
        "mobile_menu"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        let PageEvent::Click { target } = event else {
            return Flow::Continue;
        };
        let doc = &mut *ctx.doc;

        if doc.contains(self.toggle, *target) {
            let hidden = doc.toggle_class(self.menu, "hidden");
            let path = if hidden { MENU_ICON_PATH } else { CLOSE_ICON_PATH };
            set_icon(doc, self.toggle, path);
            return Flow::Continue;
        }

        if !self.is_open(doc) {
            return Flow::Continue;
        }
        let inside = doc.contains(self.menu, *target);
        let on_link = doc
            .closest(*target, |el| el.tag() == "a")
            .is_some_and(|link| doc.contains(self.menu, link));
        if !inside || on_link {
            collapse(doc);
        }
        Flow::Continue
    }
}
