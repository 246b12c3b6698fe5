use serde::{Deserialize, Serialize};
use ustr::Ustr;

use super::lenient_f64;
use crate::data_table::{CellValue, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", default)]
    pub id: Ustr,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Trip {
    pub fn label(&self) -> String {
        match (self.name.as_deref(), self.destination.as_deref()) {
            (Some(name), Some(destination)) => format!("{name} - {destination}"),
            (Some(name), None) => name.to_owned(),
            _ => self.id.to_string(),
        }
    }

    /// Only shown when the trip was edited after creation.
    pub fn last_updated(&self) -> Option<&str> {
        self.updated_at
            .as_deref()
            .filter(|updated| Some(*updated) != self.created_at.as_deref())
    }
}

impl TableRow for Trip {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "_id" => CellValue::from(self.id.as_str()),
            "name" => self.name.clone().into(),
            "destination" => self.destination.clone().into(),
            "price" => self.price.into(),
            "image" => self.image.clone().into(),
            "isActive" => self.is_active.into(),
            "createdAt" => self.created_at.clone().into(),
            _ => CellValue::Empty,
        }
    }
}

/// Body of `POST /trips` and `PUT /trips/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub name: String,
    pub destination: String,
    pub price: f64,
    pub image: String,
    pub is_active: bool,
}

/// `PATCH /trips/{id}/toggle-status` answers with the updated trip.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleTripResponse {
    pub trip: Trip,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_trip_with_string_price() {
        let trip: Trip = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Great Migration",
            "destination": "Serengeti",
            "price": "2450",
            "isActive": true,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(trip.price, Some(2450.0));
        assert_eq!(trip.field("price").to_string(), "2450");
        assert_eq!(trip.last_updated(), None);
        assert_eq!(trip.label(), "Great Migration - Serengeti");
    }

    #[test]
    fn missing_active_flag_means_inactive() {
        let trip: Trip = serde_json::from_value(json!({ "_id": "t2" })).unwrap();
        assert!(!trip.is_active);
        assert_eq!(trip.field("isActive"), CellValue::Bool(false));
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let payload = TripPayload {
            name: "Gorilla Trek".to_owned(),
            destination: "Bwindi".to_owned(),
            price: 1800.0,
            image: "https://img.example/gorilla.jpg".to_owned(),
            is_active: true,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["price"], 1800.0);
    }
}
