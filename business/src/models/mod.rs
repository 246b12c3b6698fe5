//! Wire models for the admin API.
//!
//! The backend is a document store: ids arrive as `_id`, references such as
//! `userId` are sometimes populated objects and sometimes bare ids, and numbers
//! are occasionally strings. Deserialization is lenient about all of that.

mod booking;
mod dashboard;
mod trip;
mod user;

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub use booking::{Booking, BookingTrip, BookingUser, Guest, GuestInput, NewBookingPayload, PaymentDetails};
pub use dashboard::{DashboardStats, StatCard, UserGrowthPoint, WeeklyBookingsPoint};
pub use trip::{ToggleTripResponse, Trip, TripPayload};
pub use user::User;

/// Shown wherever a value is missing on detail pages.
pub const PENDING: &str = "Pending";

/// A populated reference, or `None` when the field is null or a bare id.
pub(crate) fn populated<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(value
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Strings, numbers and booleans all read as their string form.
pub(crate) fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers, or strings holding a number.
pub(crate) fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `2024-06-01T09:30:00.000Z` or `2024-06-01` as `6/1/2024`. Anything else is
/// returned unchanged.
pub fn format_date(raw: &str) -> String {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return at.format("%-m/%-d/%Y").to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format("%-m/%-d/%Y").to_string();
    }
    raw.to_owned()
}

pub fn format_date_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.format("%-m/%-d/%Y, %-I:%M %p").to_string())
        .unwrap_or_else(|_| format_date(raw))
}

/// `$1500` / `$12.5`, the way prices are shown across the console.
pub fn format_price(amount: f64) -> String {
    format!("${amount}")
}

pub fn or_pending(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(PENDING)
        .to_owned()
}
