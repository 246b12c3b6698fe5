use kittest::Queryable;
use safari_business::{AuthCompute, FILL_ALL_FIELDS, LoginInput, Route};
use serde_json::json;

use crate::common::{TestCtx, mock_json};

mod common;

#[tokio::test]
async fn test_login_form_displayed() {
    let mut ctx = TestCtx::new_app().await;

    let harness = ctx.harness_mut();
    harness.step();

    assert!(
        harness.query_by_label("Adventure Safari Admin").is_some(),
        "heading should be displayed"
    );
    assert!(harness.query_by_label("Email:").is_some());
    assert!(harness.query_by_label("Password:").is_some());
    assert!(harness.query_by_label("Login").is_some());
    assert!(
        harness.query_by_label("Logout").is_none(),
        "navbar is hidden while signed out"
    );
}

#[tokio::test]
async fn test_login_with_blank_fields_shows_message() {
    let mut ctx = TestCtx::new_app().await;

    let harness = ctx.harness_mut();
    harness.step();
    harness.get_by_label("Login").click();
    harness.step();
    harness.step();

    assert!(
        harness.query_by_label(FILL_ALL_FIELDS).is_some(),
        "missing fields message should be shown"
    );
}

#[tokio::test]
async fn test_login_flow_opens_dashboard() {
    let mut ctx = TestCtx::new_app().await;
    mock_json(
        ctx.mock_server(),
        "POST",
        "/auth/login",
        200,
        json!({ "token": "abc", "user": { "name": "Amina" } }),
    )
    .await;
    mock_json(
        ctx.mock_server(),
        "GET",
        "/dashboard/stats",
        200,
        json!({
            "cardData": [{ "title": "Total Users", "value": "1,247" }],
            "userGrowthData": [{ "month": "Jan", "users": 120 }],
            "weeklyBookingsData": [{ "day": "Mon", "bookings": 15 }]
        }),
    )
    .await;

    {
        let harness = ctx.harness_mut();
        harness.step();
        let input = harness.state_mut().state_mut().ctx.state_mut::<LoginInput>();
        input.email = "amina@safari.example".to_owned();
        input.password = "secret".to_owned();
        harness.get_by_label("Login").click();
    }
    ctx.settle().await;
    ctx.settle().await;

    let harness = ctx.harness_mut();
    let state = &harness.state().state().ctx;
    assert_eq!(*state.state::<Route>(), Route::Dashboard);
    assert!(matches!(
        state.compute::<AuthCompute>().status,
        safari_business::AuthStatus::Authenticated(_)
    ));

    assert!(harness.query_by_label("Amina").is_some(), "navbar shows the user");
    assert!(harness.query_by_label("Total Users").is_some());
    assert!(harness.query_by_label("1,247").is_some());
    assert!(harness.query_by_label("Weekly Bookings").is_some());
}

#[tokio::test]
async fn test_login_rejected_shows_server_message() {
    let mut ctx = TestCtx::new_app().await;
    mock_json(
        ctx.mock_server(),
        "POST",
        "/auth/login",
        401,
        json!({ "message": "Invalid credentials" }),
    )
    .await;

    {
        let harness = ctx.harness_mut();
        harness.step();
        let input = harness.state_mut().state_mut().ctx.state_mut::<LoginInput>();
        input.email = "amina@safari.example".to_owned();
        input.password = "wrong".to_owned();
        harness.get_by_label("Login").click();
    }
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Invalid credentials").is_some());
    assert_eq!(*harness.state().state().ctx.state::<Route>(), Route::Login);
}
