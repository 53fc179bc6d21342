use super::*;
use booking_core::FixedBookingIds;
use chrono::NaiveDate;
use shared::protocol::ProofFile;
use url::Url;

use crate::{
    contact_form::{contact_thanks, CONTACT_FORM_ID, CONTACT_MISSING_MESSAGE},
    document::NodeId,
    leave_guard::LEAVE_PROMPT,
    mobile_menu::{CLOSE_ICON_PATH, MENU_ICON_PATH},
    payment_form::UPLOAD_SECTION_ID,
    scaffold,
    submit_guard::{INVALID_FIELD_CLASS, PROCESSING_LABEL},
};

/// Timers due exactly at the end of an `advance` may not be handled yet.
const TICK: Duration = Duration::from_millis(1);

fn url(path: &str) -> Url {
    Url::parse("https://hotel.example/")
        .and_then(|base| base.join(path))
        .expect("url")
}

fn options() -> UiOptions {
    UiOptions {
        today: NaiveDate::from_ymd_opt(2026, 10, 18),
        ..UiOptions::default()
    }
}

struct Home {
    home_link: NodeId,
    rooms_link: NodeId,
    toggle: NodeId,
    dropdown_button: NodeId,
    image: NodeId,
    form: NodeId,
    name: NodeId,
    password: NodeId,
    password_toggle: NodeId,
}

fn home_page(path: &str) -> (Document, Home) {
    let mut doc = Document::new(url(path));
    let body = doc.body();
    let nav = doc.append(body, "nav").id("navbar").layout(0.0, 64.0).node();
    let home_link = doc.append(nav, "a").class("nav-link").attr("href", "/").node();
    let rooms_link = doc.append(nav, "a").class("nav-link").attr("href", "#rooms").node();
    doc.append(nav, "a").class("nav-link").attr("href", "#about");
    let toggle = doc.append(nav, "button").id("menuToggle").node();
    doc.append(toggle, "svg").attr("d", MENU_ICON_PATH);
    let menu = doc.append(nav, "div").id("mobileMenu").class("hidden").node();
    doc.append(menu, "a").attr("href", "#about").text("About");
    let dropdown_button = doc.append(nav, "button").id("userDropdownButton").node();
    doc.append(dropdown_button, "i").class("fas fa-chevron-down");
    doc.append(nav, "div").id("userDropdownMenu");

    let rooms = doc.append(body, "section").id("rooms").layout(600.0, 500.0).node();
    doc.append(body, "section").id("about").layout(1200.0, 500.0);
    let image = doc
        .append(rooms, "img")
        .attr("data-src", "/img/deluxe.jpg")
        .node();

    let form = doc
        .append(body, "form")
        .id("reservationForm")
        .attr("method", "POST")
        .node();
    let name = doc
        .append(form, "input")
        .id("name")
        .attr("type", "text")
        .attr("required", "")
        .node();
    let password = doc.append(form, "input").attr("type", "password").node();
    let password_toggle = doc
        .append(form, "button")
        .class("password-toggle")
        .attr("type", "button")
        .node();
    doc.append(form, "button").attr("type", "submit").text("Send");

    let handles = Home {
        home_link,
        rooms_link,
        toggle,
        dropdown_button,
        image,
        form,
        name,
        password,
        password_toggle,
    };
    (doc, handles)
}

fn toast_texts(doc: &Document) -> Vec<String> {
    doc.query(|el| el.tag() == "p" && el.has_class("font-medium"))
        .into_iter()
        .filter_map(|node| doc.text(node).map(str::to_string))
        .collect()
}

fn click(app: &mut PageApp, target: NodeId) -> Flow {
    app.dispatch(PageEvent::Click { target })
}

#[tokio::test(start_paused = true)]
async fn body_is_revealed_then_initialized() {
    let (doc, _) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let body = app.document().body();

    assert_eq!(app.document().style(body, "opacity"), Some("1"));
    assert_eq!(app.document().style(body, "visibility"), Some("visible"));
    assert!(!app.document().has_class(body, "initialized"));

    app.advance(INITIALIZED_DELAY + TICK).await;
    assert!(app.document().has_class(body, "initialized"));
}

#[tokio::test(start_paused = true)]
async fn navbar_follows_scrolling() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let navbar = app.document().get("navbar").expect("navbar");

    app.dispatch(PageEvent::Scroll { y: 30.0 });
    assert!(app.document().has_class(navbar, "scrolled"));
    assert_eq!(app.document().style(navbar, "transform"), Some("translateY(0)"));

    app.dispatch(PageEvent::Scroll { y: 650.0 });
    assert_eq!(app.document().style(navbar, "transform"), Some("translateY(-100%)"));
    assert!(app.document().has_class(home.rooms_link, "active"));
    assert!(app.document().has_class(home.rooms_link, "text-gold"));

    app.dispatch(PageEvent::Scroll { y: 10.0 });
    assert!(!app.document().has_class(navbar, "scrolled"));
    assert_eq!(app.document().style(navbar, "transform"), Some("translateY(0)"));
    assert!(!app.document().has_class(home.rooms_link, "active"));
}

#[tokio::test(start_paused = true)]
async fn mobile_menu_toggles_and_closes_on_outside_click() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let menu = app.document().get("mobileMenu").expect("menu");
    let icon = app.document().query_within(home.toggle, |el| el.tag() == "svg")[0];

    click(&mut app, home.toggle);
    assert!(!app.document().has_class(menu, "hidden"));
    assert_eq!(app.document().attr(icon, "d"), Some(CLOSE_ICON_PATH));

    let body = app.document().body();
    click(&mut app, body);
    assert!(app.document().has_class(menu, "hidden"));
    assert_eq!(app.document().attr(icon, "d"), Some(MENU_ICON_PATH));
}

#[tokio::test(start_paused = true)]
async fn anchor_click_scrolls_below_navbar() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());

    let flow = click(&mut app, home.rooms_link);
    assert!(flow.is_prevented());
    assert_eq!(app.document().scroll_y(), 600.0 - 64.0);
    assert_eq!(app.document().location().fragment(), Some("rooms"));
}

#[tokio::test(start_paused = true)]
async fn initial_hash_scrolls_after_delay() {
    let (doc, _) = home_page("/#about");
    let mut app = PageApp::start(doc, options());
    assert_eq!(app.document().scroll_y(), 0.0);

    app.advance(crate::smooth_scroll::HASH_SCROLL_DELAY + TICK).await;
    assert_eq!(app.document().scroll_y(), 1200.0 - 80.0);
}

#[tokio::test(start_paused = true)]
async fn home_link_scrolls_to_top_on_home_page_only() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    app.dispatch(PageEvent::Scroll { y: 500.0 });

    assert!(click(&mut app, home.home_link).is_prevented());
    assert_eq!(app.document().scroll_y(), 0.0);
    assert!(app.document().has_class(home.home_link, "active"));

    let (doc, home) = home_page("/rooms");
    let mut app = PageApp::start(doc, options());
    assert!(!click(&mut app, home.home_link).is_prevented());
}

#[tokio::test(start_paused = true)]
async fn dropdown_fades_in_and_out() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let menu = app.document().get("userDropdownMenu").expect("menu");

    assert!(click(&mut app, home.dropdown_button).is_prevented());
    assert!(app.document().has_class(menu, "show"));
    assert_eq!(app.document().style(menu, "opacity"), Some("0"));
    app.advance(crate::dropdown::FADE_IN_DELAY + TICK).await;
    assert_eq!(app.document().style(menu, "opacity"), Some("1"));

    app.dispatch(PageEvent::KeyDown {
        key: "Escape".into(),
    });
    assert_eq!(app.document().style(menu, "opacity"), Some("0"));
    assert!(app.document().has_class(menu, "show"));
    app.advance(crate::dropdown::TRANSITION + TICK).await;
    assert!(!app.document().has_class(menu, "show"));
}

#[tokio::test(start_paused = true)]
async fn reopening_dropdown_cancels_pending_hide() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let menu = app.document().get("userDropdownMenu").expect("menu");

    click(&mut app, home.dropdown_button);
    app.advance(Duration::from_millis(50)).await;
    let body = app.document().body();
    click(&mut app, body);
    app.advance(Duration::from_millis(100)).await;
    click(&mut app, home.dropdown_button);
    app.advance(Duration::from_millis(500)).await;

    assert!(app.document().has_class(menu, "show"));
    assert_eq!(app.document().style(menu, "opacity"), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn lazy_image_loads_once_visible() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    assert_eq!(app.document().attr(home.image, "src"), None);

    app.dispatch(PageEvent::BecameVisible { target: home.image });
    assert_eq!(app.document().attr(home.image, "src"), Some("/img/deluxe.jpg"));
    assert!(app.document().has_class(home.image, "loaded"));
}

#[tokio::test(start_paused = true)]
async fn first_empty_field_gets_focus() {
    let (doc, home) = home_page("/");
    let app = PageApp::start(doc, options());
    assert_eq!(app.document().focused(), Some(home.name));
}

#[tokio::test(start_paused = true)]
async fn password_toggle_flips_input_type() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());

    click(&mut app, home.password_toggle);
    assert_eq!(app.document().attr(home.password, "type"), Some("text"));
    assert_eq!(
        app.document().attr(home.password_toggle, "data-icon"),
        Some("fa-eye-slash")
    );

    click(&mut app, home.password_toggle);
    assert_eq!(app.document().attr(home.password, "type"), Some("password"));
}

#[tokio::test(start_paused = true)]
async fn required_fields_block_submission() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());

    let flow = app.dispatch(PageEvent::Submit { form: home.form });
    assert!(flow.is_prevented());
    assert!(app.document().has_class(home.name, INVALID_FIELD_CLASS));
    assert_eq!(app.document().focused(), Some(home.name));
    assert_eq!(
        toast_texts(app.document()),
        vec!["Please fill in all required fields.".to_string()]
    );

    app.dispatch(PageEvent::Input {
        target: home.name,
        value: "Ayu".into(),
    });
    assert!(!app.document().has_class(home.name, INVALID_FIELD_CLASS));
}

#[tokio::test(start_paused = true)]
async fn second_submit_is_blocked_until_reset() {
    let (doc, home) = home_page("/");
    let mut app = PageApp::start(doc, options());
    let button = app
        .document()
        .query_within(home.form, |el| el.attr("type") == Some("submit"))[0];
    app.dispatch(PageEvent::Input {
        target: home.name,
        value: "Ayu".into(),
    });

    assert!(!app.dispatch(PageEvent::Submit { form: home.form }).is_prevented());
    assert_eq!(app.document().text(button), Some(PROCESSING_LABEL));
    assert_eq!(app.document().attr(button, "disabled"), Some(""));
    assert!(app.dispatch(PageEvent::Submit { form: home.form }).is_prevented());

    app.dispatch(PageEvent::Reset { form: home.form });
    assert_eq!(app.document().text(button), Some("Send"));
    assert_eq!(app.document().attr(button, "disabled"), None);
    assert!(!app.dispatch(PageEvent::Submit { form: home.form }).is_prevented());
}

struct Contact {
    form: NodeId,
    name: NodeId,
    email: NodeId,
    button: NodeId,
}

fn contact_page() -> (Document, Contact) {
    let mut doc = Document::new(url("/"));
    let body = doc.body();
    let form = doc
        .append(body, "form")
        .id(CONTACT_FORM_ID)
        .attr("method", "POST")
        .node();
    let name = doc.append(form, "input").attr("type", "text").node();
    let email = doc.append(form, "input").attr("type", "email").node();
    doc.append(form, "textarea");
    let button = doc
        .append(form, "button")
        .attr("type", "submit")
        .text("Send Inquiry")
        .node();
    (
        doc,
        Contact {
            form,
            name,
            email,
            button,
        },
    )
}

#[tokio::test(start_paused = true)]
async fn contact_form_needs_name_and_email() {
    let (doc, contact) = contact_page();
    let mut app = PageApp::start(doc, options());
    app.dispatch(PageEvent::Input {
        target: contact.name,
        value: "Ayu".into(),
    });

    let flow = app.dispatch(PageEvent::Submit { form: contact.form });
    assert!(flow.is_prevented());
    assert_eq!(app.document().alerts(), [CONTACT_MISSING_MESSAGE.to_string()]);
    assert_eq!(app.document().value(contact.name), "Ayu");
}

#[tokio::test(start_paused = true)]
async fn contact_form_thanks_guest_and_resets() {
    let (doc, contact) = contact_page();
    let mut app = PageApp::start(doc, options());
    app.dispatch(PageEvent::Input {
        target: contact.name,
        value: "Ayu".into(),
    });
    app.dispatch(PageEvent::Input {
        target: contact.email,
        value: "ayu@example.com".into(),
    });

    let flow = app.dispatch(PageEvent::Submit { form: contact.form });
    assert!(flow.is_prevented());
    assert_eq!(
        app.document().alerts(),
        [contact_thanks("Ayu", "ayu@example.com")]
    );
    assert_eq!(
        app.document().alerts()[0],
        "Thank you for your inquiry, Ayu! We will contact you shortly at ayu@example.com."
    );
    assert_eq!(app.document().value(contact.name), "");
    assert_eq!(app.document().value(contact.email), "");
    assert_eq!(app.document().text(contact.button), Some("Send Inquiry"));
    assert_eq!(app.document().attr(contact.button, "disabled"), None);

    assert!(app.dispatch(PageEvent::Submit { form: contact.form }).is_prevented());
    assert_eq!(
        app.document().alerts().last().map(String::as_str),
        Some(CONTACT_MISSING_MESSAGE)
    );
}

fn payment_app() -> PageApp {
    PageApp::start(scaffold::payment_page(url("/payment/42")), options())
}

fn payment_nodes(app: &PageApp) -> (NodeId, NodeId, NodeId, NodeId) {
    let doc = app.document();
    let form = doc.get(crate::payment_form::PAYMENT_FORM_ID).expect("form");
    let method = doc.query_within(form, |el| el.attr("name") == Some("payment_method"))[0];
    let proof = doc.query_within(form, |el| el.attr("name") == Some("payment_proof"))[0];
    let button = doc.query_within(form, |el| el.attr("type") == Some("submit"))[0];
    (form, method, proof, button)
}

#[tokio::test(start_paused = true)]
async fn choosing_a_method_reveals_upload() {
    let mut app = payment_app();
    let (_, method, _, _) = payment_nodes(&app);
    let upload = app.document().get(UPLOAD_SECTION_ID).expect("upload");

    app.dispatch(PageEvent::Change {
        target: method,
        value: "bca".into(),
    });
    assert!(!app.document().has_class(upload, "hidden"));
}

#[tokio::test(start_paused = true)]
async fn payment_submit_requires_method_and_proof() {
    let mut app = payment_app();
    let (form, method, _, _) = payment_nodes(&app);

    assert!(app.dispatch(PageEvent::Submit { form }).is_prevented());
    app.dispatch(PageEvent::Change {
        target: method,
        value: "bca".into(),
    });
    assert!(app.dispatch(PageEvent::Submit { form }).is_prevented());

    assert_eq!(
        toast_texts(app.document()),
        vec![
            "Please select a payment method.".to_string(),
            "Please upload payment proof for BCA payment.".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn payment_submit_rejects_oversized_proof() {
    let mut app = payment_app();
    let (form, method, proof, _) = payment_nodes(&app);
    app.dispatch(PageEvent::Change {
        target: method,
        value: "qris".into(),
    });
    app.document_mut().set_files(
        proof,
        vec![ProofFile::new("receipt.pdf", "application/pdf", 6 * 1024 * 1024)],
    );

    assert!(app.dispatch(PageEvent::Submit { form }).is_prevented());
    assert_eq!(
        toast_texts(app.document()),
        vec!["File size must be less than 5MB.".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn stuck_payment_submit_resets_after_safety_timeout() {
    let mut app = payment_app();
    let (form, method, proof, button) = payment_nodes(&app);
    app.dispatch(PageEvent::Change {
        target: method,
        value: "mandiri".into(),
    });
    app.document_mut()
        .set_files(proof, vec![ProofFile::new("receipt.jpg", "image/jpeg", 120_000)]);

    assert!(!app.dispatch(PageEvent::Submit { form }).is_prevented());
    assert_eq!(app.document().text(button), Some(PROCESSING_LABEL));
    assert!(app.dispatch(PageEvent::Submit { form }).is_prevented());

    app.advance(crate::DEFAULT_SUBMIT_SAFETY_TIMEOUT + TICK).await;
    assert_eq!(app.document().text(button), Some("Submit Payment"));
    assert_eq!(app.document().attr(button, "disabled"), None);
}

#[tokio::test(start_paused = true)]
async fn leaving_payment_page_asks_first() {
    let mut app = payment_app();
    assert_eq!(app.document().history().len(), 2);

    app.document_mut().queue_confirm(false);
    app.dispatch(PageEvent::PopState);
    assert_eq!(app.document().confirms(), [LEAVE_PROMPT.to_string()]);
    assert!(app.document().navigations().is_empty());
    assert_eq!(app.document().history().len(), 3);

    app.document_mut().queue_confirm(true);
    app.dispatch(PageEvent::PopState);
    let last = app.document().navigations().last().map(|url| url.path().to_string());
    assert_eq!(last.as_deref(), Some("/rooms"));
}

#[tokio::test(start_paused = true)]
async fn leave_guard_ignores_other_pages() {
    let (doc, _) = home_page("/rooms");
    let mut app = PageApp::start(doc, options());
    app.dispatch(PageEvent::PopState);
    assert!(app.document().confirms().is_empty());
    assert_eq!(app.document().history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn booking_page_attaches_wizard() {
    let doc = scaffold::booking_page(url("/booking.html"));
    let app = PageApp::start_with_ids(doc, options(), Box::new(FixedBookingIds::new(vec![111_111])));

    assert_eq!(app.components().first(), Some(&"booking_page"));
    assert_eq!(app.document().text_of("summary-total"), Some("Rp6.660.000"));
}

#[tokio::test(start_paused = true)]
async fn init_failure_still_shows_page() {
    let mut doc = scaffold::booking_page(url("/booking.html"));
    let rooms = doc.get("rooms-selection").expect("rooms");
    doc.append(rooms, "div").class("room-option").attr("data-room", "penthouse");

    let app = PageApp::start(doc, options());
    let body = app.document().body();
    assert!(app.booking().is_none());
    assert_eq!(app.document().style(body, "opacity"), Some("1"));
    assert!(app.components().contains(&"navbar"));
}

#[tokio::test(start_paused = true)]
async fn run_returns_document_when_host_hangs_up() {
    let (doc, _) = home_page("/");
    let app = PageApp::start(doc, options());
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tx.send(PageEvent::Scroll { y: 240.0 }).expect("send");
    drop(tx);

    let doc = app.run(rx).await;
    assert_eq!(doc.scroll_y(), 240.0);
}
