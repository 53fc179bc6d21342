//! Drives the booking page with the events a guest would produce.

use anyhow::{anyhow, bail, Context};
use booking_core::{dates::format_input_date, BookingIdSource, ROOM_QUERY_PARAM};
use page_ui::{
    booking_page::{
        CHECKIN_INPUT_ID, CHECKOUT_INPUT_ID, GUESTS_INPUT_ID, PROOF_INPUT_ID, SUBMIT_BUTTON_ID,
        TERMS_INPUT_ID,
    },
    scaffold, Document, NodeId, PageApp, PageEvent, UiOptions,
};
use shared::protocol::{BookingConfirmation, BookingRequest};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_PAGE_URL: &str = "https://hotel.local/booking.html";

/// Page address for a request: the given URL, or the default booking page
/// with the requested room preselected.
pub fn page_url(request: &BookingRequest, url: Option<&str>) -> anyhow::Result<Url> {
    match url {
        Some(raw) => Url::parse(raw).with_context(|| format!("invalid page url '{raw}'")),
        None => {
            let mut url = Url::parse(DEFAULT_PAGE_URL)?;
            url.query_pairs_mut()
                .append_pair(ROOM_QUERY_PARAM, request.room.key());
            Ok(url)
        }
    }
}

fn find(doc: &Document, predicate: impl Fn(&page_ui::document::Element) -> bool) -> Option<NodeId> {
    doc.query(predicate).into_iter().next()
}

/// The page lists a fixed set of payment options; other tokens get one
/// added so the guest can pick them.
fn ensure_payment_option(doc: &mut Document, method: &str) -> anyhow::Result<()> {
    if find(doc, |el| el.has_class("payment-method") && el.attr("data-method") == Some(method))
        .is_some()
    {
        return Ok(());
    }
    let anchor = find(doc, |el| el.has_class("payment-method"))
        .context("booking page has no payment options")?;
    let parent = doc.parent(anchor).context("payment option is detached")?;
    doc.append(parent, "div")
        .class("payment-method")
        .attr("data-method", method)
        .text(&method.to_uppercase());
    Ok(())
}

fn click(app: &mut PageApp, target: Option<NodeId>, what: &str) -> anyhow::Result<()> {
    let target = target.with_context(|| format!("booking page has no {what}"))?;
    app.dispatch(PageEvent::Click { target });
    Ok(())
}

fn set_field(app: &mut PageApp, id: &str, value: String, committed: bool) -> anyhow::Result<()> {
    let target = app
        .document()
        .get(id)
        .with_context(|| format!("booking page has no '{id}' field"))?;
    let event = if committed {
        PageEvent::Change { target, value }
    } else {
        PageEvent::Input { target, value }
    };
    app.dispatch(event);
    Ok(())
}

/// Walks the wizard through all three steps and submits. A rejected
/// submission becomes an error carrying the alert text.
pub fn book(
    request: &BookingRequest,
    url: Url,
    options: UiOptions,
    ids: Box<dyn BookingIdSource>,
) -> anyhow::Result<BookingConfirmation> {
    let mut doc = scaffold::booking_page(url);
    ensure_payment_option(&mut doc, &request.payment_method)?;
    let mut app = PageApp::start_with_ids(doc, options, ids);
    if app.booking().is_none() {
        bail!("booking wizard failed to start");
    }

    let to_rooms = find(app.document(), |el| el.attr("data-step") == Some("2"));
    click(&mut app, to_rooms, "room step")?;
    let room = find(app.document(), |el| {
        el.has_class("room-option") && el.attr("data-room") == Some(request.room.key())
    });
    click(&mut app, room, "matching room option")?;
    let to_form = find(app.document(), |el| el.attr("data-step") == Some("3"));
    click(&mut app, to_form, "booking form step")?;

    let guest = &request.guest;
    set_field(&mut app, "firstName", guest.first_name.clone(), false)?;
    set_field(&mut app, "lastName", guest.last_name.clone(), false)?;
    set_field(&mut app, "email", guest.email.clone(), false)?;
    set_field(&mut app, "phone", guest.phone.clone(), false)?;
    if let Some(checkin) = request.checkin {
        set_field(&mut app, CHECKIN_INPUT_ID, format_input_date(checkin), true)?;
    }
    if let Some(checkout) = request.checkout {
        set_field(&mut app, CHECKOUT_INPUT_ID, format_input_date(checkout), true)?;
    }
    set_field(&mut app, GUESTS_INPUT_ID, request.guests.to_string(), true)?;

    let method = find(app.document(), |el| {
        el.has_class("payment-method") && el.attr("data-method") == Some(request.payment_method.as_str())
    });
    click(&mut app, method, "matching payment option")?;

    if let Some(proof) = &guest.payment_proof {
        let input = app
            .document()
            .get(PROOF_INPUT_ID)
            .context("booking page has no proof upload")?;
        app.document_mut().set_files(input, vec![proof.clone()]);
    }
    let terms = if guest.terms_accepted { "on" } else { "" };
    set_field(&mut app, TERMS_INPUT_ID, terms.to_string(), true)?;

    let submit = app.document().get(SUBMIT_BUTTON_ID);
    click(&mut app, submit, "submit button")?;
    debug!(alerts = app.document().alerts().len(), "booking submitted");

    if let Some(confirmation) = app.booking().and_then(|page| page.last_confirmation()) {
        info!(booking_id = %confirmation.booking_id, "booking confirmed");
        return Ok(confirmation.clone());
    }
    let message = app
        .document()
        .alerts()
        .last()
        .cloned()
        .unwrap_or_else(|| "booking was not confirmed".to_string());
    Err(anyhow!(message))
}

#[cfg(test)]
mod tests {
    use booking_core::{FixedBookingIds, ProofPolicy};
    use chrono::NaiveDate;
    use shared::{
        domain::RoomId,
        protocol::{GuestDetails, ProofFile},
    };

    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            room: RoomId::Deluxe,
            payment_method: "bca".into(),
            checkin: NaiveDate::from_ymd_opt(2026, 11, 2),
            checkout: NaiveDate::from_ymd_opt(2026, 11, 4),
            guests: 2,
            guest: GuestDetails {
                first_name: "Ayu".into(),
                last_name: "Lestari".into(),
                email: "ayu@example.com".into(),
                phone: "081234567890".into(),
                terms_accepted: true,
                payment_proof: Some(ProofFile::new("transfer.png", "image/png", 300_000)),
            },
        }
    }

    fn options() -> UiOptions {
        UiOptions {
            today: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..UiOptions::default()
        }
    }

    #[test]
    fn default_url_preselects_room() {
        let url = page_url(&request(), None).expect("url");
        assert_eq!(url.as_str(), "https://hotel.local/booking.html?room=deluxe");
    }

    #[tokio::test]
    async fn books_a_room() {
        let request = request();
        let url = page_url(&request, None).expect("url");
        let confirmation = book(&request, url, options(), Box::new(FixedBookingIds::new(vec![555_001])))
            .expect("confirmed");

        assert_eq!(confirmation.booking_id, "FH-2025-555001");
        assert_eq!(confirmation.room_name, "Deluxe Room");
        assert_eq!(confirmation.checkin_display, "2 Nov 2026");
        assert_eq!(confirmation.checkout_display, "4 Nov 2026");
        assert_eq!(confirmation.guests_display, "2 Guests");
        assert_eq!(confirmation.total_display, "Rp3.330.000");
    }

    #[tokio::test]
    async fn unlisted_method_without_proof_is_rejected() {
        let mut request = request();
        request.payment_method = "ovo".into();
        request.guest.payment_proof = None;
        let url = page_url(&request, None).expect("url");

        let err = book(&request, url, options(), Box::new(FixedBookingIds::new(vec![])))
            .expect_err("rejected");
        assert_eq!(err.to_string(), "Please upload payment proof for OVO payment.");
    }

    #[tokio::test]
    async fn exempt_policy_lets_qris_through_without_proof() {
        let mut request = request();
        request.payment_method = "qris".into();
        request.guest.payment_proof = None;
        let mut options = options();
        options.wizard.proof_policy = ProofPolicy::ExemptQris;
        let url = page_url(&request, None).expect("url");

        let confirmation = book(&request, url, options, Box::new(FixedBookingIds::new(vec![100_000])))
            .expect("confirmed");
        assert_eq!(confirmation.booking_id, "FH-2025-100000");
    }

    #[tokio::test]
    async fn terms_are_checked_first() {
        let mut request = request();
        request.guest.terms_accepted = false;
        request.guest.email = "not-an-email".into();
        let url = page_url(&request, None).expect("url");

        let err = book(&request, url, options(), Box::new(FixedBookingIds::new(vec![])))
            .expect_err("rejected");
        assert_eq!(err.to_string(), "Please agree to the terms and conditions");
    }
}
