use tracing::{debug, info};

use crate::{
    document::{Document, NodeId},
    events::{Flow, PageEvent},
    Behavior, PageCtx,
};

pub const CONTACT_FORM_ID: &str = "contactForm";
pub const CONTACT_MISSING_MESSAGE: &str = "Please fill in all required fields";

pub fn contact_thanks(name: &str, email: &str) -> String {
    format!("Thank you for your inquiry, {name}! We will contact you shortly at {email}.")
}

/// Home page inquiry form: name and email required, answered with an alert
/// and a cleared form. Nothing is sent anywhere.
pub struct ContactForm {
    form: NodeId,
}

impl ContactForm {
    pub fn attach(ctx: &mut PageCtx<'_>) -> Option<Self> {
        ctx.doc.get(CONTACT_FORM_ID).map(|form| Self { form })
    }

    fn first_value(doc: &Document, form: NodeId, input_type: &str) -> String {
        doc.query_within(form, |el| {
            el.tag() == "input" && el.attr("type") == Some(input_type)
        })
        .first()
        .map(|input| doc.value(*input).trim().to_string())
        .unwrap_or_default()
    }
}

impl Behavior for ContactForm {
    fn name(&self) -> &'static str {
        "contact_form"
    }

    fn on_event(&mut self, event: &PageEvent, ctx: &mut PageCtx<'_>) -> Flow {
        match event {
            PageEvent::Submit { form } if *form == self.form => {}
            _ => return Flow::Continue,
        }

        let name = Self::first_value(ctx.doc, self.form, "text");
        let email = Self::first_value(ctx.doc, self.form, "email");
        if name.is_empty() || email.is_empty() {
            debug!("contact form incomplete");
            ctx.doc.alert(CONTACT_MISSING_MESSAGE);
            return Flow::PreventDefault;
        }

        ctx.doc.alert(contact_thanks(&name, &email));
        ctx.doc.reset_form(self.form);
        info!(email = %email, "contact inquiry received");
        Flow::PreventDefault
    }
}
