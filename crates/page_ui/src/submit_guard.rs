//! Blocks double submission of POST forms and flags empty required fields.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    notifications::NotificationKind,
    Behavior, PageCtx,
};

pub const PROCESSING_LABEL: &str = "Processing...";
pub const INVALID_FIELD_CLASS: &str = "border-red-500";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Submit button of a form and the label it had before submission.
pub(crate) struct SubmitButton {
    node: Option<NodeId>,
    original_label: String,
}

impl SubmitButton {
    pub(crate) fn find(doc: &Document, form: NodeId) -> Self {
        let node = doc
            .query_within(form, |el| el.tag() == "button" && el.attr("type") == Some("submit"))
            .into_iter()
            .next();
        let original_label = node
            .and_then(|button| doc.text(button))
            .unwrap_or_default()
            .to_string();
        Self {
            node,
            original_label,
        }
    }

    pub(crate) fn set_processing(&self, doc: &mut Document) {
        if let Some(button) = self.node {
            doc.set_attr(button, "disabled", "");
            doc.set_text(button, PROCESSING_LABEL);
        }
    }

    pub(crate) fn reset(&self, doc: &mut Document) {
        if let Some(button) = self.node {
            doc.remove_attr(button, "disabled");
            doc.set_text(button, self.original_label.clone());
        }
    }
}

struct GuardedForm {
    submitting: bool,
    button: SubmitButton,
}

pub struct FormSubmissionGuard {
    forms: HashMap<NodeId, GuardedForm>,
    flagged: BTreeSet<NodeId>,
}

impl FormSubmissionGuard {
    /// Guards every POST form except those marked `data-no-protection` and
    /// the payment form, which has its own guard.
    pub fn attach(ctx: &mut PageCtx<'_>) -> Self {
        let doc = &*ctx.doc;
        let forms = doc
            .query(|el| {
                el.tag() == "form"
                    && el
                        .attr("method")
                        .is_some_and(|method| method.eq_ignore_ascii_case("post"))
                    && !el.has_attr("data-no-protection")
                    && el.id() != Some(crate::payment_form::PAYMENT_FORM_ID)
            })
            .into_iter()
            .map(|form| {
                (
                    form,
                    GuardedForm {
                        submitting: false,
                        button: SubmitButton::find(doc, form),
                    },
                )
            })
            .collect();
        Self {
            forms,
            flagged: BTreeSet::new(),
        }
    }

    fn on_submit(&mut self, form: NodeId, ctx: &mut PageCtx<'_>) -> Flow {
        let Some(guarded) = self.forms.get_mut(&form) else {
            return Flow::Continue;
        };
        if guarded.submitting {
            debug!("form already submitting; ignoring repeat submit");
            return Flow::PreventDefault;
        }

        let missing = ctx.doc.query_within(form, |el| {
            el.has_attr("required") && el.value().trim().is_empty()
        });
        if let Some(first) = missing.first().copied() {
            for field in &missing {
                ctx.doc.add_class(*field, INVALID_FIELD_CLASS);
                self.flagged.insert(*field);
            }
            ctx.doc.focus(first);
            ctx.notify(MISSING_FIELDS_MESSAGE, NotificationKind::Error);
            return Flow::PreventDefault;
        }

        guarded.submitting = true;
        guarded.button.set_processing(ctx.doc);
        Flow::Continue
    }
}

impl Behavior for FormSubmissionGuard {
    fn name(&self) -> &'static str {
        "submit_guard"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        match event {
            PageEvent::Submit { form } => self.on_submit(*form, ctx),
            PageEvent::Reset { form } => {
                if let Some(guarded) = self.forms.get_mut(form) {
                    guarded.submitting = false;
                    guarded.button.reset(ctx.doc);
                }
                Flow::Continue
            }
            PageEvent::Input { target, .. } | PageEvent::Change { target, .. } => {
                if self.flagged.remove(target) {
                    ctx.doc.remove_class(*target, INVALID_FIELD_CLASS);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }
}
