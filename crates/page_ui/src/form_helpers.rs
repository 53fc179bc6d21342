use crate::{
    document::Element,
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

fn is_focusable_field(el: &Element) -> bool {
    match el.tag() {
        "input" => el.attr("type") != Some("hidden"),
        "textarea" | "select" => true,
        _ => false,
    }
}

/// Autofocus for forms and the show/hide toggle on password fields.
pub struct FormHelpers;

impl FormHelpers {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Self {
        let doc = &mut *ctx.doc;
        for form in doc.query_tag("form") {
            let first = doc.query_within(form, is_focusable_field).first().copied();
            if let Some(field) = first.filter(|field| doc.value(*field).is_empty()) {
                doc.focus(field);
            }
        }
        Self
    }
}

impl Behavior for FormHelpers {
    fn name(&self) -> &'static str {
        "form_helpers"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        let PageEvent::Click { target } = event else {
            return Flow::Continue;
        };
        let doc = &mut *ctx.doc;
        let Some(toggle) = doc.closest(*target, |el| el.has_class("password-toggle")) else {
            return Flow::Continue;
        };
        let Some(input) = doc.previous_sibling(toggle) else {
            return Flow::Continue;
        };
        if doc.attr(input, "type") == Some("password") {
            doc.set_attr(input, "type", "text");
            doc.set_attr(toggle, "data-icon", "fa-eye-slash");
        } else {
            doc.set_attr(input, "type", "password");
            doc.set_attr(toggle, "data-icon", "fa-eye");
        }
        Flow::Continue
    }
}
