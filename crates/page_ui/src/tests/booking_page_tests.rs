use super::*;
use booking_core::FixedBookingIds;
use chrono::NaiveDate;
use shared::{domain::WizardStep, protocol::ProofFile};
use tokio::sync::mpsc::UnboundedReceiver;
use url::Url;

use crate::{notifications::Notifications, scaffold, timers::Expired, Timeouts, UiOptions};

struct Harness {
    doc: Document,
    timers: Timeouts,
    _expired: UnboundedReceiver<Expired>,
    notifications: Notifications,
    options: UiOptions,
}

impl Harness {
    fn new(doc: Document) -> Self {
        let (timers, expired) = Timeouts::new();
        let options = UiOptions {
            today: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..UiOptions::default()
        };
        Self {
            doc,
            timers,
            _expired: expired,
            notifications: Notifications::new(options.notification_duration),
            options,
        }
    }

    fn ctx(&mut self) -> PageCtx<'_> {
        PageCtx {
            doc: &mut self.doc,
            timers: &self.timers,
            notifications: &mut self.notifications,
            options: &self.options,
        }
    }

    fn attach(&mut self) -> BookingPage {
        BookingPage::attach(&mut self.ctx(), Box::new(FixedBookingIds::new(vec![482_913])))
            .expect("attach")
            .expect("booking markup present")
    }

    fn send(&mut self, page: &mut BookingPage, event: PageEvent) -> Flow {
        page.on_event(&event, &mut self.ctx())
    }

    fn click(&mut self, page: &mut BookingPage, node: NodeId) -> Flow {
        self.send(page, PageEvent::Click { target: node })
    }

    fn node(&self, predicate: impl Fn(&crate::document::Element) -> bool) -> NodeId {
        self.doc.query(predicate)[0]
    }

    fn fill(&mut self, id: &str, value: &str) {
        let node = self.doc.get(id).expect("field");
        self.doc.set_value(node, value);
    }
}

fn page(path: &str) -> Document {
    let url = Url::parse("https://hotel.example/")
        .and_then(|base| base.join(path))
        .expect("url");
    scaffold::booking_page(url)
}

fn fill_guest(h: &mut Harness) {
    h.fill("firstName", "Ayu");
    h.fill("lastName", "Lestari");
    h.fill("email", "ayu@example.com");
    h.fill("phone", "081234567890");
    let terms = h.doc.get(TERMS_INPUT_ID).expect("terms");
    h.doc.set_attr(terms, "checked", "");
    let proof = h.doc.get(PROOF_INPUT_ID).expect("proof input");
    h.doc
        .set_files(proof, vec![ProofFile::new("receipt.png", "image/png", 200_000)]);
}

#[test]
fn init_renders_defaults() {
    let mut h = Harness::new(page("booking.html"));
    let page = h.attach();

    assert_eq!(page.wizard().state().room, RoomId::Executive);
    assert_eq!(h.doc.text_of("summary-total"), Some("Rp6.660.000"));
    assert_eq!(h.doc.text_of("final-checkin-display"), Some("18 Oct 2026"));
    assert_eq!(h.doc.text_of("final-checkout-display"), Some("20 Oct 2026"));
    assert_eq!(h.doc.text_of("final-payment"), Some("QRIS"));
}

#[test]
fn room_query_parameter_preselects() {
    let mut h = Harness::new(page("booking.html?room=deluxe"));
    let page = h.attach();

    assert_eq!(page.wizard().state().room, RoomId::Deluxe);
    assert_eq!(h.doc.text_of("summary-room"), Some("Deluxe Room"));
}

#[test]
fn unknown_room_markup_fails_attach() {
    let mut doc = page("booking.html");
    let rooms = doc.get("rooms-selection").expect("rooms");
    doc.append(rooms, "div").class("room-option").attr("data-room", "penthouse");
    let mut h = Harness::new(doc);

    let err = BookingPage::attach(&mut h.ctx(), Box::new(FixedBookingIds::new(vec![])))
        .err()
        .expect("unknown room is an error");
    assert!(format!("{err:#}").contains("penthouse"));
}

#[test]
fn pages_without_wizard_are_skipped() {
    let doc = scaffold::payment_page(Url::parse("https://hotel.example/payment/7").expect("url"));
    let mut h = Harness::new(doc);
    let attached = BookingPage::attach(&mut h.ctx(), Box::new(FixedBookingIds::new(vec![])))
        .expect("no error");
    assert!(attached.is_none());
}

#[test]
fn clicks_drive_room_method_and_step() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();

    let presidential = h.node(|el| el.attr("data-room") == Some("presidential"));
    let title = h.doc.query_within(presidential, |el| el.tag() == "h3")[0];
    h.click(&mut page, title);
    assert_eq!(page.wizard().state().room, RoomId::Presidential);
    assert_eq!(h.doc.text_of("summary-total"), Some("Rp16.650.000"));

    let mandiri = h.node(|el| el.attr("data-method") == Some("mandiri"));
    h.click(&mut page, mandiri);
    assert_eq!(page.wizard().state().payment_method.as_str(), "mandiri");

    let next = h.node(|el| el.attr("data-step") == Some("3"));
    let flow = h.click(&mut page, next);
    assert!(flow.is_prevented());
    assert_eq!(page.wizard().state().current_step, WizardStep::BookingForm);
}

#[test]
fn checkin_change_clamps_checkout() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();

    let checkin = h.doc.get(CHECKIN_INPUT_ID).expect("checkin");
    h.send(
        &mut page,
        PageEvent::Change {
            target: checkin,
            value: "2026-10-25".into(),
        },
    );

    assert_eq!(h.doc.value_of(CHECKOUT_INPUT_ID), "2026-10-26");
    let checkout = h.doc.get(CHECKOUT_INPUT_ID).expect("checkout");
    assert_eq!(h.doc.attr(checkout, "min"), Some("2026-10-26"));
    assert_eq!(h.doc.text_of("final-checkout-display"), Some("26 Oct 2026"));
}

#[test]
fn guests_change_updates_label() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();

    let guests = h.doc.get(GUESTS_INPUT_ID).expect("guests");
    h.send(
        &mut page,
        PageEvent::Change {
            target: guests,
            value: "3".into(),
        },
    );
    assert_eq!(page.wizard().state().guests, 3);
    assert_eq!(h.doc.text_of("final-guests"), Some("3"));
}

#[test]
fn submit_opens_confirmation_and_escape_closes_it() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();
    fill_guest(&mut h);

    let submit = h.doc.get(SUBMIT_BUTTON_ID).expect("submit");
    h.click(&mut page, submit);

    let confirmation = page.last_confirmation().expect("confirmed");
    assert_eq!(confirmation.booking_id, "FH-2025-482913");
    assert_eq!(h.doc.text_of("popupRoom"), Some("Executive Suite"));
    assert!(page.wizard().is_confirmation_open());

    h.send(
        &mut page,
        PageEvent::KeyDown {
            key: "Escape".into(),
        },
    );
    assert!(!page.wizard().is_confirmation_open());
    let popup = h.doc.get(POPUP_ID).expect("popup");
    assert!(!h.doc.has_class(popup, "active"));
}

#[test]
fn rejected_submit_alerts_once() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();
    fill_guest(&mut h);
    h.fill("phone", "0812");

    let submit = h.doc.get(SUBMIT_BUTTON_ID).expect("submit");
    h.click(&mut page, submit);

    assert!(page.last_confirmation().is_none());
    assert_eq!(h.doc.alerts(), ["Please enter a valid phone number".to_string()]);
    assert_eq!(h.doc.focused(), h.doc.get("phone"));
}

#[test]
fn go_home_closes_and_navigates() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();
    fill_guest(&mut h);
    let submit = h.doc.get(SUBMIT_BUTTON_ID).expect("submit");
    h.click(&mut page, submit);

    let home = h.node(|el| el.attr("data-action") == Some("go-home"));
    h.click(&mut page, home);

    assert!(!page.wizard().is_confirmation_open());
    let navigated: Vec<_> = h.doc.navigations().iter().map(|url| url.path().to_string()).collect();
    assert_eq!(navigated, vec!["/index.html".to_string()]);
}

#[test]
fn backdrop_click_closes_popup() {
    let mut h = Harness::new(page("booking.html"));
    let mut page = h.attach();
    fill_guest(&mut h);
    let submit = h.doc.get(SUBMIT_BUTTON_ID).expect("submit");
    h.click(&mut page, submit);

    let content = h.node(|el| el.has_class("popup-content"));
    h.click(&mut page, content);
    assert!(page.wizard().is_confirmation_open());

    let popup = h.doc.get(POPUP_ID).expect("popup");
    h.click(&mut page, popup);
    assert!(!page.wizard().is_confirmation_open());
}
