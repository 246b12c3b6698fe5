use serde::Deserialize;

use super::lenient_string;

/// Response of `GET /dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub card_data: Vec<StatCard>,
    #[serde(default)]
    pub user_growth_data: Vec<UserGrowthPoint>,
    #[serde(default)]
    pub weekly_bookings_data: Vec<WeeklyBookingsPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatCard {
    pub title: String,
    /// Pre-formatted by the backend (`"1,247"`) or a plain number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserGrowthPoint {
    pub month: String,
    #[serde(default)]
    pub users: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WeeklyBookingsPoint {
    pub day: String,
    #[serde(default)]
    pub bookings: u64,
}
