//! Markup of the site's booking and payment pages, built into a [`Document`].

use shared::domain::{RoomId, WizardStep};
use url::Url;

use crate::{
    booking_page::{
        CHECKIN_INPUT_ID, CHECKOUT_INPUT_ID, GUESTS_INPUT_ID, PROOF_INPUT_ID, SUBMIT_BUTTON_ID,
        TERMS_INPUT_ID,
    },
    document::{Document, NodeId},
    payment_form::{PAYMENT_FORM_ID, UPLOAD_SECTION_ID},
    presenter::{POPUP_ID, SELECTED_METHOD_INPUT_ID},
};

const PAYMENT_METHODS: [&str; 3] = ["qris", "bca", "mandiri"];
const SECTION_HEIGHT: f64 = 800.0;

fn navbar(doc: &mut Document) {
    let body = doc.body();
    let nav = doc.append(body, "nav").id("navbar").layout(0.0, 80.0).node();
    for (href, label) in [("/", "Home"), ("#facilities-view", "Facilities"), ("#rooms-selection", "Rooms")] {
        doc.append(nav, "a").class("nav-link").attr("href", href).text(label);
    }
    let toggle = doc.append(nav, "button").id("menuToggle").node();
    doc.append(toggle, "svg").attr("d", crate::mobile_menu::MENU_ICON_PATH);
    let menu = doc.append(nav, "div").id("mobileMenu").class("hidden").node();
    doc.append(menu, "a").attr("href", "#rooms-selection").text("Rooms");
}

fn text_input(doc: &mut Document, parent: NodeId, id: &str, kind: &str) -> NodeId {
    doc.append(parent, "input")
        .id(id)
        .attr("name", id)
        .attr("type", kind)
        .node()
}

/// The three-step booking page, with every element the wizard writes to.
pub fn booking_page(location: Url) -> Document {
    let mut doc = Document::new(location);
    navbar(&mut doc);
    let body = doc.body();

    let mut sections = Vec::new();
    for (index, step) in WizardStep::ALL.into_iter().enumerate() {
        let top = (index as f64 + 1.0) * SECTION_HEIGHT;
        let class = if step == WizardStep::Facilities {
            "section-active"
        } else {
            "section-hidden"
        };
        let section = doc
            .append(body, "section")
            .id(step.section_id())
            .class(class)
            .layout(top, SECTION_HEIGHT)
            .node();
        sections.push(section);
    }

    let progress = doc.append(body, "div").class("progress").node();
    for _ in WizardStep::ALL {
        doc.append(progress, "div").class("progress-step");
    }
    doc.append(progress, "div").id("progress-bar");

    let [facilities, rooms, form] = [sections[0], sections[1], sections[2]];
    doc.append(facilities, "button")
        .attr("data-step", "2")
        .text("Choose a room");

    for room in RoomId::ALL {
        let entry = room.entry();
        let option = doc
            .append(rooms, "div")
            .class("room-option")
            .attr("data-room", room.key())
            .node();
        doc.append(option, "h3").text(entry.name);
        doc.append(option, "p").text(entry.description);
    }
    let summary = doc.append(rooms, "div").class("summary").node();
    for id in ["summary-room", "summary-price", "summary-charges", "summary-tax", "summary-total"] {
        doc.append(summary, "span").id(id);
    }
    doc.append(rooms, "button")
        .attr("data-step", "3")
        .text("Continue");

    for id in ["firstName", "lastName"] {
        text_input(&mut doc, form, id, "text");
    }
    text_input(&mut doc, form, "email", "email");
    text_input(&mut doc, form, "phone", "tel");
    text_input(&mut doc, form, CHECKIN_INPUT_ID, "date");
    text_input(&mut doc, form, CHECKOUT_INPUT_ID, "date");
    doc.append(form, "span").id("final-checkin-display");
    doc.append(form, "span").id("final-checkout-display");
    doc.append(form, "select")
        .id(GUESTS_INPUT_ID)
        .attr("value", "1");
    doc.append(form, "span").id("final-guests");

    for method in PAYMENT_METHODS {
        doc.append(form, "div")
            .class("payment-method")
            .attr("data-method", method)
            .text(&method.to_uppercase());
    }
    doc.append(form, "input")
        .id(SELECTED_METHOD_INPUT_ID)
        .attr("type", "hidden");
    text_input(&mut doc, form, PROOF_INPUT_ID, "file");
    for id in ["final-room", "final-total", "final-payment"] {
        doc.append(form, "span").id(id);
    }
    text_input(&mut doc, form, TERMS_INPUT_ID, "checkbox");
    doc.append(form, "button")
        .id(SUBMIT_BUTTON_ID)
        .attr("type", "button")
        .text("Confirm Booking");

    let popup = doc.append(body, "div").id(POPUP_ID).class("popup-overlay").node();
    let content = doc.append(popup, "div").class("popup-content").node();
    for id in ["popupBookingId", "popupRoom", "popupCheckin", "popupCheckout", "popupGuests", "popupTotal"] {
        doc.append(content, "span").id(id);
    }
    doc.append(content, "button")
        .attr("data-action", "close-popup")
        .text("Close");
    doc.append(content, "button")
        .attr("data-action", "go-home")
        .text("Back to Home");

    doc
}

/// The payment upload page served after a booking is created.
pub fn payment_page(location: Url) -> Document {
    let mut doc = Document::new(location);
    navbar(&mut doc);
    let body = doc.body();

    let form = doc
        .append(body, "form")
        .id(PAYMENT_FORM_ID)
        .attr("method", "post")
        .node();
    doc.append(form, "input")
        .attr("type", "hidden")
        .attr("name", "payment_method");
    let upload = doc
        .append(form, "div")
        .id(UPLOAD_SECTION_ID)
        .class("hidden")
        .node();
    doc.append(upload, "input")
        .attr("type", "file")
        .attr("name", "payment_proof");
    doc.append(form, "button")
        .attr("type", "submit")
        .text("Submit Payment");

    doc
}
