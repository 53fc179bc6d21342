use tracing::info;

use crate::{
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

pub const LEAVE_PROMPT: &str = "Are you sure you want to leave? Your payment will be cancelled.";

/// Asks before the back button leaves a payment or booking page.
pub struct LeaveGuard {
    redirect_path: String,
}

impl LeaveGuard {
    pub fn applies_to(path: &str) -> bool {
        path.contains("/payment") || path.contains("/booking/")
    }

    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        let current = ctx.doc.location().clone();
        if !Self::applies_to(current.path()) {
            return None;
        }
        ctx.doc.replace_history(current.clone());
        ctx.doc.push_history(current);
        Some(Self {
            redirect_path: ctx.options.leave_redirect_path.clone(),
        })
    }
}

impl Behavior for LeaveGuard {
    fn name(&self) -> &'static str {
        "leave_guard"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        if *event != PageEvent::PopState {
            return Flow::Continue;
        }
        let current = ctx.doc.location().clone();
        if ctx.doc.confirm(LEAVE_PROMPT) {
            info!(from = %current, "guest left the payment flow");
            ctx.doc.navigate(&self.redirect_path);
        } else {
            ctx.doc.push_history(current);
        }
        Flow::Continue
    }
}
