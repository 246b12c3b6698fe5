//! Admin API calls.
//!
//! Plain async functions over [`crate::http::Client`]; commands call them and map
//! the result into compute updates. Every call except [`login`] takes the
//! [`Session`] explicitly and sends its token as a bearer header.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Session;
use crate::http::{Client, Method, RequestBuilder, Response};
use crate::models::{
    Booking, DashboardStats, NewBookingPayload, ToggleTripResponse, Trip, TripPayload, User,
};

pub const NO_RESPONSE: &str = "No response received from server";
pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("No authentication token found. Please log in.")]
    NotAuthenticated,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("Failed to parse server response: {0}")]
    Decode(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `message` from a JSON error body, else `fallback`.
pub fn error_message(body: &[u8], fallback: impl FnOnce() -> String) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(fallback)
}

fn status_error(response: &Response) -> ApiError {
    let status = response.status;
    ApiError::Status {
        status,
        message: error_message(&response.body, || format!("HTTP error! status: {status}")),
    }
}

fn authorized(method: Method, url: &str, session: &Session) -> ApiResult<RequestBuilder> {
    if session.token.is_empty() {
        return Err(ApiError::NotAuthenticated);
    }
    Ok(Client::request(method, url)
        .bearer(&session.token)
        .header("content-type", "application/json"))
}

async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.message))?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(status_error(&response))
    }
}

fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    response.json().map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes either `T` itself or `{ "<key>": T }`.
fn decode_wrapped<T: DeserializeOwned>(response: &Response, key: &str) -> ApiResult<T> {
    let value: serde_json::Value = decode(response)?;
    let inner = match value.get(key) {
        Some(inner) if inner.is_object() || inner.is_array() => inner.clone(),
        _ => value,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get<T: DeserializeOwned>(url: &str, session: &Session, key: &str) -> ApiResult<T> {
    let response = send(authorized(Method::Get, url, session)?).await?;
    decode_wrapped(&response, key)
}

async fn send_json<B: Serialize>(
    method: Method,
    url: &str,
    session: &Session,
    body: &B,
) -> ApiResult<Response> {
    let request = authorized(method, url, session)?
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    send(request).await
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// POST `/auth/login`
pub async fn login(api_url: &str, email: &str, password: &str) -> ApiResult<LoginResponse> {
    let url = format!("{api_url}/auth/login");
    let request = Client::post(url)
        .json(&LoginRequest { email, password })
        .map_err(|e| ApiError::Encode(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|_| ApiError::Network(NO_RESPONSE.to_owned()))?;

    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            message: error_message(&response.body, || LOGIN_FAILED.to_owned()),
        });
    }
    decode(&response)
}

/// GET `/admin/all-users`
pub async fn list_users(api_url: &str, session: &Session) -> ApiResult<Vec<User>> {
    get(&format!("{api_url}/admin/all-users"), session, "users").await
}

/// GET `/admin/get-all-bookings`
pub async fn list_bookings(api_url: &str, session: &Session) -> ApiResult<Vec<Booking>> {
    get(&format!("{api_url}/admin/get-all-bookings"), session, "bookings").await
}

/// GET `/admin/bookings/{id}`
pub async fn get_booking(api_url: &str, session: &Session, id: &str) -> ApiResult<Booking> {
    get(&format!("{api_url}/admin/bookings/{id}"), session, "booking").await
}

/// POST `/admin/create-booking`
pub async fn create_booking(
    api_url: &str,
    session: &Session,
    payload: &NewBookingPayload,
) -> ApiResult<()> {
    let url = format!("{api_url}/admin/create-booking");
    send_json(Method::Post, &url, session, payload).await?;
    Ok(())
}

/// GET `/trips`
pub async fn list_trips(api_url: &str, session: &Session) -> ApiResult<Vec<Trip>> {
    get(&format!("{api_url}/trips"), session, "trips").await
}

/// GET `/trips/{id}`
pub async fn get_trip(api_url: &str, session: &Session, id: &str) -> ApiResult<Trip> {
    get(&format!("{api_url}/trips/{id}"), session, "trip").await
}

/// POST `/trips`
pub async fn create_trip(api_url: &str, session: &Session, payload: &TripPayload) -> ApiResult<()> {
    let url = format!("{api_url}/trips");
    send_json(Method::Post, &url, session, payload).await?;
    Ok(())
}

/// PUT `/trips/{id}`
pub async fn update_trip(
    api_url: &str,
    session: &Session,
    id: &str,
    payload: &TripPayload,
) -> ApiResult<()> {
    let url = format!("{api_url}/trips/{id}");
    send_json(Method::Put, &url, session, payload).await?;
    Ok(())
}

/// DELETE `/trips/{id}`
pub async fn delete_trip(api_url: &str, session: &Session, id: &str) -> ApiResult<()> {
    let url = format!("{api_url}/trips/{id}");
    send(authorized(Method::Delete, &url, session)?).await?;
    Ok(())
}

/// PATCH `/trips/{id}/toggle-status`
pub async fn toggle_trip_status(api_url: &str, session: &Session, id: &str) -> ApiResult<Trip> {
    let url = format!("{api_url}/trips/{id}/toggle-status");
    let response = send(authorized(Method::Patch, &url, session)?).await?;
    decode::<ToggleTripResponse>(&response).map(|toggled| toggled.trip)
}

/// GET `/dashboard/stats`
pub async fn dashboard_stats(api_url: &str, session: &Session) -> ApiResult<DashboardStats> {
    get(&format!("{api_url}/dashboard/stats"), session, "stats").await
}
