use egui::accesskit::Role;
use kittest::Queryable;
use safari_business::{BookingsPage, Route};
use safari_ui::pages::{bookings_page, users_page};
use serde_json::json;
use ustr::Ustr;

use crate::common::{TestCtx, mock_json};

mod common;

#[tokio::test]
async fn test_users_page_lists_every_user_without_controls() {
    let mut ctx = TestCtx::page(users_page).await;
    mock_json(
        ctx.mock_server(),
        "GET",
        "/admin/all-users",
        200,
        json!([
            {
                "_id": "u1",
                "name": "Achieng Odhiambo",
                "email": "achieng@example.com",
                "isVerified": true,
                "isRegistrationPayment": true,
                "isPasswordUpload": true
            },
            { "_id": "u2", "name": "Baraka Mwangi", "email": "baraka@example.com" }
        ]),
    )
    .await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("All Users (2)").is_some());
    assert!(harness.query_by_label("Achieng Odhiambo").is_some());
    assert!(harness.query_by_label("baraka@example.com").is_some());
    assert_eq!(harness.query_all_by_label("Yes").count(), 3);
    assert_eq!(harness.query_all_by_label("No").count(), 3);
    assert!(harness.query_by_label("Search:").is_none());
    assert!(harness.query_by_label("Show").is_none());
    assert!(harness.query_by_label("Next").is_none());
}

#[tokio::test]
async fn test_users_page_shows_error_with_retry() {
    let mut ctx = TestCtx::page(users_page).await;
    mock_json(
        ctx.mock_server(),
        "GET",
        "/admin/all-users",
        500,
        json!({ "message": "Database unavailable" }),
    )
    .await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(
        harness
            .query_by_label("Error loading users: Database unavailable")
            .is_some()
    );

    harness.get_by_label("Try Again").click();
    ctx.settle().await;

    let fetches = ctx
        .mock_server()
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/admin/all-users")
        .count();
    assert_eq!(fetches, 2);
}

#[tokio::test]
async fn test_bookings_page_fallbacks_and_view_action() {
    let mut ctx = TestCtx::page(bookings_page).await;
    mock_json(
        ctx.mock_server(),
        "GET",
        "/admin/get-all-bookings",
        200,
        json!({ "bookings": [{
            "_id": "b1",
            "userId": { "_id": "u1", "name": "Achieng Odhiambo", "email": "achieng@example.com" },
            "guests": [],
            "bookingStatus": "confirmed"
        }] }),
    )
    .await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Booking Management").is_some());
    assert!(harness.query_by_label("All Bookings (1)").is_some());
    assert!(harness.query_by_label("Trip Deleted").is_some());
    assert!(harness.query_by_label("Search:").is_some());

    // "View" is also the column header.
    harness.get_by_role_and_label(Role::Button, "View").click();
    harness.step();
    harness.step();

    assert_eq!(
        *harness.state().ctx.state::<Route>(),
        Route::BookingDetail(Ustr::from("b1"))
    );
}

#[tokio::test]
async fn test_bookings_search_without_match() {
    let mut ctx = TestCtx::page(bookings_page).await;
    mock_json(
        ctx.mock_server(),
        "GET",
        "/admin/get-all-bookings",
        200,
        json!([{ "_id": "b1", "bookingId": "BK-1", "bookingStatus": "pending" }]),
    )
    .await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    harness
        .state_mut()
        .ctx
        .state_mut::<BookingsPage>()
        .table
        .set_search_query("no such booking");
    harness.step();

    assert!(harness.query_by_label("No entries found").is_some());
    assert!(harness.query_by_label("Showing 0 to 0 of 0 entries").is_some());
}
