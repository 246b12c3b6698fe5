use serde::{Deserialize, Serialize};
use ustr::Ustr;

use super::{lenient_f64, lenient_string, populated};
use crate::data_table::{CellValue, TableRow};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUser {
    #[serde(rename = "_id", default)]
    pub id: Ustr,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTrip {
    #[serde(rename = "_id", default)]
    pub id: Ustr,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(rename = "_id", default)]
    pub id: Option<Ustr>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub passport_country: Option<String>,
    #[serde(default)]
    pub passport_issued_on: Option<String>,
    #[serde(default)]
    pub passport_expires_on: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub emergency_contact_number: Option<String>,
    /// Document links.
    #[serde(default)]
    pub passport: Option<String>,
    #[serde(default)]
    pub medical_certificate: Option<String>,
    #[serde(default)]
    pub travel_insurance: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub payer_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", default)]
    pub id: Ustr,
    #[serde(default, deserialize_with = "lenient_string")]
    pub booking_id: Option<String>,
    #[serde(rename = "userId", default, deserialize_with = "populated")]
    pub user: Option<BookingUser>,
    #[serde(rename = "tripId", default, deserialize_with = "populated")]
    pub trip: Option<BookingTrip>,
    #[serde(default)]
    pub booking_date: Option<String>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub booking_status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub acknowledge: Option<bool>,
    #[serde(default)]
    pub registration_payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "__v", default)]
    pub version: Option<i64>,
}

impl Booking {
    /// `bookingStatus` lowercased; `None` when missing.
    pub fn status(&self) -> Option<String> {
        self.booking_status.as_deref().map(str::to_lowercase)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status().as_deref() == Some("cancelled")
    }

    /// Registration fee that counts as revenue: present, paid, and not on a
    /// cancelled booking.
    pub fn paid_registration_amount(&self) -> Option<f64> {
        if self.is_cancelled() {
            return None;
        }
        let payment = self.registration_payment_details.as_ref()?;
        match (payment.status.as_deref(), payment.amount) {
            (Some("paid"), Some(amount)) if amount != 0.0 => Some(amount),
            _ => None,
        }
    }
}

impl TableRow for Booking {
    fn field(&self, key: &str) -> CellValue {
        let user = self.user.as_ref();
        let trip = self.trip.as_ref();
        let payment = self.registration_payment_details.as_ref();

        match key {
            "_id" => CellValue::from(self.id.as_str()),
            "bookingId" => self.booking_id.clone().into(),
            "userId.name" => user.and_then(|u| u.name.clone()).into(),
            "userId.email" => user.and_then(|u| u.email.clone()).into(),
            "tripId.name" => trip.and_then(|t| t.name.clone()).into(),
            "tripId.destination" => trip.and_then(|t| t.destination.clone()).into(),
            "tripId.price" => trip.and_then(|t| t.price).into(),
            "bookingDate" => self.booking_date.clone().into(),
            "guests" => self.guests.len().into(),
            "bookingStatus" => self.booking_status.clone().into(),
            "paymentStatus" => self.payment_status.clone().into(),
            "registrationPaymentDetails.amount" => payment.and_then(|p| p.amount).into(),
            "registrationPaymentDetails.status" => payment.and_then(|p| p.status.clone()).into(),
            "createdAt" => self.created_at.clone().into(),
            _ => CellValue::Empty,
        }
    }
}

/// One guest row of the new-booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GuestInput {
    pub name: String,
    pub age: String,
    pub passport: String,
}

impl GuestInput {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.age, &self.passport]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Body of `POST /admin/create-booking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingPayload {
    pub user_id: Ustr,
    pub trip_id: Ustr,
    pub guests: Vec<GuestInput>,
    pub travel_date: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn populated_references_decode_and_bare_ids_are_dropped() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "b1",
            "bookingId": 1042,
            "userId": { "_id": "u1", "name": "Neema", "email": "neema@example.com" },
            "tripId": "t-deleted",
            "guests": [{ "name": "Neema", "age": 31 }],
            "bookingStatus": "Confirmed",
            "registrationPaymentDetails": { "status": "paid", "amount": "250" }
        }))
        .unwrap();

        assert_eq!(booking.booking_id.as_deref(), Some("1042"));
        assert_eq!(booking.user.as_ref().and_then(|u| u.name.as_deref()), Some("Neema"));
        assert!(booking.trip.is_none());
        assert_eq!(booking.guests[0].age.as_deref(), Some("31"));
        assert_eq!(booking.status().as_deref(), Some("confirmed"));
        assert_eq!(booking.paid_registration_amount(), Some(250.0));
        assert_eq!(booking.field("guests"), CellValue::Int(1));
        assert_eq!(booking.field("tripId.name"), CellValue::Empty);
    }

    #[test]
    fn cancelled_or_unpaid_bookings_bring_no_revenue() {
        let cancelled: Booking = serde_json::from_value(json!({
            "bookingStatus": "CANCELLED",
            "registrationPaymentDetails": { "status": "paid", "amount": 100 }
        }))
        .unwrap();
        let unpaid: Booking = serde_json::from_value(json!({
            "bookingStatus": "pending",
            "registrationPaymentDetails": { "status": "created", "amount": 100 }
        }))
        .unwrap();

        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.paid_registration_amount(), None);
        assert_eq!(unpaid.paid_registration_amount(), None);
    }

    #[test]
    fn guest_input_requires_every_field() {
        let mut guest = GuestInput {
            name: "Juma".to_owned(),
            age: "40".to_owned(),
            passport: String::new(),
        };
        assert!(!guest.is_complete());
        guest.passport = "A1234567".to_owned();
        assert!(guest.is_complete());
    }

    #[test]
    fn payload_serializes_camel_case() {
        let payload = NewBookingPayload {
            user_id: Ustr::from("u1"),
            trip_id: Ustr::from("t1"),
            guests: vec![GuestInput::default()],
            travel_date: "2025-01-10".to_owned(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["travelDate"], "2025-01-10");
        assert_eq!(value["guests"][0]["passport"], "");
    }
}
