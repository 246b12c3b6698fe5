use serde::Deserialize;
use ustr::Ustr;

use super::lenient_string;
use crate::data_table::{CellValue, TableRow};

/// A customer account as listed by `/admin/all-users`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: Ustr,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub booking_count: Option<i64>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub is_registration_payment: Option<bool>,
    /// The backend spells the passport-upload flag this way.
    #[serde(default)]
    pub is_password_upload: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// `name (email)`, used by the customer picker.
    pub fn label(&self) -> String {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) => format!("{name} ({email})"),
            (Some(name), None) => name.to_owned(),
            (None, Some(email)) => email.to_owned(),
            (None, None) => self.id.to_string(),
        }
    }
}

impl TableRow for User {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "_id" => CellValue::from(self.id.as_str()),
            "name" => self.name.clone().into(),
            "email" => self.email.clone().into(),
            "phone" => self.phone.clone().into(),
            "bookingCount" => self.booking_count.into(),
            "isVerified" => self.is_verified.into(),
            "isRegistrationPayment" => self.is_registration_payment.into(),
            "isPasswordUpload" => self.is_password_upload.into(),
            "createdAt" => self.created_at.clone().into(),
            _ => CellValue::Empty,
        }
    }
}
