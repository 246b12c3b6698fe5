//! Booking detail and the new-booking form.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use common::{TestContext, booking};
use safari_business::models::GuestInput;
use safari_business::{
    BookingDetail, BookingsList, CreateBookingCommand, FILL_REQUIRED_FIELDS, LoadBookingCommand,
    NewBookingCompute, NewBookingInput, RefreshBookingsCommand, Remote, Route, SubmitStatus,
    navigate,
};
use serde_json::json;
use ustr::Ustr;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn detail_loads_the_routed_booking() {
    let mut test = TestContext::authenticated().await;
    test.mock("GET", "/api/admin/bookings/b1", 200, booking("b1", "confirmed", Some(("paid", 200.0))))
        .await;

    navigate(&mut test.ctx, Route::BookingDetail(Ustr::from("b1")));
    test.ctx.dispatch::<LoadBookingCommand>();
    test.flush_and_wait().await;

    let detail = test.ctx.compute::<BookingDetail>();
    let Remote::Loaded(loaded) = &detail.status else {
        panic!("expected loaded booking, got {:?}", detail.status);
    };
    assert_eq!(loaded.booking_id.as_deref(), Some("BK-b1"));
    assert_eq!(loaded.guests.len(), 1);
    assert_eq!(loaded.guests[0].age.as_deref(), Some("29"));
}

#[tokio::test]
async fn missing_booking_reports_backend_message() {
    let mut test = TestContext::authenticated().await;
    test.mock("GET", "/api/admin/bookings/nope", 404, json!({ "message": "Booking not found" }))
        .await;

    navigate(&mut test.ctx, Route::BookingDetail(Ustr::from("nope")));
    test.ctx.dispatch::<LoadBookingCommand>();
    test.flush_and_wait().await;

    assert_eq!(
        test.ctx.compute::<BookingDetail>().status.error(),
        Some("Booking not found")
    );
}

#[tokio::test]
async fn new_booking_posts_payload_and_invalidates_list() {
    let mut test = TestContext::authenticated().await;
    test.mock("GET", "/api/admin/get-all-bookings", 200, json!([booking("b1", "pending", None)]))
        .await;
    test.ctx.dispatch::<RefreshBookingsCommand>();
    test.flush_and_wait().await;
    assert_eq!(test.ctx.compute::<BookingsList>().rows().len(), 1);

    Mock::given(method("POST"))
        .and(path("/api/admin/create-booking"))
        .and(body_json(json!({
            "userId": "u1",
            "tripId": "t1",
            "guests": [{ "name": "Achieng", "age": "29", "passport": "K0001" }],
            "travelDate": "2025-07-14",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created" })))
        .expect(1)
        .mount(&test.server)
        .await;

    navigate(&mut test.ctx, Route::NewBooking);
    *test.ctx.state_mut::<NewBookingInput>() = NewBookingInput {
        user_id: Some(Ustr::from("u1")),
        trip_id: Some(Ustr::from("t1")),
        travel_date: "2025-07-14".to_owned(),
        guests: vec![GuestInput {
            name: "Achieng".to_owned(),
            age: "29".to_owned(),
            passport: "K0001".to_owned(),
        }],
    };
    test.ctx.dispatch::<CreateBookingCommand>();
    test.flush_and_wait().await;

    assert_eq!(test.ctx.state::<Route>(), &Route::Bookings);
    assert!(test.ctx.compute::<BookingsList>().status.is_idle());
    assert_eq!(test.ctx.state::<NewBookingInput>(), &NewBookingInput::default());
}

#[tokio::test]
async fn incomplete_booking_is_rejected_locally() {
    let mut test = TestContext::authenticated().await;

    navigate(&mut test.ctx, Route::NewBooking);
    test.ctx.dispatch::<CreateBookingCommand>();
    test.flush_and_wait().await;

    assert_eq!(
        test.ctx.compute::<NewBookingCompute>().status,
        SubmitStatus::Failed(FILL_REQUIRED_FIELDS.to_owned())
    );
    assert_eq!(test.ctx.state::<Route>(), &Route::NewBooking);
}
