//! Payment page form: method selection, proof-of-payment checks, and a
//! safety reset for a submit that never completes.

use booking_core::validation::{validate_payment_proof, ProofPolicy};
use shared::{domain::PaymentMethod, error::ValidationError};
use tracing::{info, warn};

use crate::{
    document::NodeId,
    events::{Flow, PageEvent},
    notifications::NotificationKind,
    submit_guard::SubmitButton,
    timers::{TimeoutHandle, TimerKey},
    Behavior, PageCtx,
};

pub const PAYMENT_FORM_ID: &str = "paymentForm";
pub const UPLOAD_SECTION_ID: &str = "universalUploadSection";
const METHOD_FIELD: &str = "payment_method";
const PROOF_FIELD: &str = "payment_proof";

pub struct PaymentFormGuard {
    form: NodeId,
    button: SubmitButton,
    upload_section: Option<NodeId>,
    policy: ProofPolicy,
    submitting: bool,
    safety_reset: Option<TimeoutHandle>,
}

impl PaymentFormGuard {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        let form = ctx.doc.get(PAYMENT_FORM_ID)?;
        Some(Self {
            form,
            button: SubmitButton::find(ctx.doc, form),
            upload_section: ctx.doc.get(UPLOAD_SECTION_ID),
            policy: ctx.options.wizard.proof_policy,
            submitting: false,
            safety_reset: None,
        })
    }

    fn field(&self, ctx: &PageCtx<'_>, name: &str) -> Option<NodeId> {
        ctx.doc
            .query_within(self.form, |el| el.tag() == "input" && el.attr("name") == Some(name))
            .into_iter()
            .next()
    }

    fn on_submit(&mut self, ctx: &mut PageCtx<'_>) -> Flow {
        if self.submitting {
            return Flow::PreventDefault;
        }

        let method = self
            .field(ctx, METHOD_FIELD)
            .map(|input| PaymentMethod::new(ctx.doc.value(input)))
            .unwrap_or_default();
        if method.is_empty() {
            ctx.notify("Please select a payment method.", NotificationKind::Error);
            return Flow::PreventDefault;
        }

        let proof = self
            .field(ctx, PROOF_FIELD)
            .and_then(|input| ctx.doc.element(input))
            .and_then(|el| el.files().first().cloned());
        if let Err(err) = validate_payment_proof(&method, proof.as_ref(), self.policy) {
            self.reject(ctx, &err);
            return Flow::PreventDefault;
        }

        self.submitting = true;
        self.button.set_processing(ctx.doc);
        let timeout = ctx.options.submit_safety_timeout;
        self.safety_reset = Some(
            ctx.timers
                .schedule(timeout, TimerKey::SubmitSafetyReset(self.form)),
        );
        info!(method = %method, "payment form submitted");
        Flow::Continue
    }

    fn reject(&mut self, ctx: &mut PageCtx<'_>, err: &ValidationError) {
        ctx.notify(&err.to_string(), NotificationKind::Error);
        self.submitting = false;
        self.button.reset(ctx.doc);
    }

    fn reset(&mut self, ctx: &mut PageCtx<'_>) {
        if let Some(pending) = self.safety_reset.take() {
            pending.cancel();
        }
        self.submitting = false;
        self.button.reset(ctx.doc);
    }
}

impl Behavior for PaymentFormGuard {
    fn name(&self) -> &'static str {
        "payment_form"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        match event {
            PageEvent::Submit { form } if *form == self.form => self.on_submit(ctx),
            PageEvent::Reset { form } if *form == self.form => {
                self.reset(ctx);
                Flow::Continue
            }
            PageEvent::Change { target, value } | PageEvent::Input { target, value } => {
                let is_method = ctx.doc.contains(self.form, *target)
                    && ctx.doc.attr(*target, "name") == Some(METHOD_FIELD);
                if is_method && !value.is_empty() {
                    if let Some(section) = self.upload_section {
                        ctx.doc.remove_class(section, "hidden");
                    }
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_timer(&mut self, key: TimerKey, ctx: &mut PageCtx<'_>) {
        if key != TimerKey::SubmitSafetyReset(self.form) {
            return;
        }
        self.safety_reset = None;
        if self.submitting {
            warn!("payment submission taking too long; resetting submit button");
            self.submitting = false;
            self.button.reset(ctx.doc);
        }
    }
}
