use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State,
};
use ustr::Ustr;

use crate::bookings::FILL_REQUIRED_FIELDS;
use crate::login_state::require_session;
use crate::models::{Trip, TripPayload};
use crate::{BusinessConfig, Route, SubmitStatus, TripDetail, TripsList, api};

pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";

/// Create / edit trip form.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFormInput {
    /// Trip being edited; `None` creates a new one.
    pub editing: Option<Ustr>,
    /// Set once the form was reset for the current target.
    pub initialized: bool,
    pub name: String,
    pub destination: String,
    /// Kept as typed; parsed on save.
    pub price: String,
    pub image: String,
    pub is_active: bool,
}

impl Default for TripFormInput {
    fn default() -> Self {
        Self {
            editing: None,
            initialized: false,
            name: String::new(),
            destination: String::new(),
            price: String::new(),
            image: String::new(),
            is_active: true,
        }
    }
}

impl TripFormInput {
    pub fn for_target(editing: Option<Ustr>) -> Self {
        Self {
            editing,
            initialized: true,
            ..Self::default()
        }
    }

    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            editing: Some(trip.id),
            initialized: true,
            name: trip.name.clone().unwrap_or_default(),
            destination: trip.destination.clone().unwrap_or_default(),
            price: trip.price.map(|price| price.to_string()).unwrap_or_default(),
            image: trip.image.clone().unwrap_or_default(),
            is_active: trip.is_active,
        }
    }

    pub fn validate(&self) -> Result<TripPayload, String> {
        let name = self.name.trim();
        let destination = self.destination.trim();
        let price = self.price.trim();
        let image = self.image.trim();

        if [name, destination, price, image].iter().any(|field| field.is_empty()) {
            return Err(FILL_REQUIRED_FIELDS.to_owned());
        }
        let price = match price.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => price,
            _ => return Err(PRICE_NOT_POSITIVE.to_owned()),
        };

        Ok(TripPayload {
            name: name.to_owned(),
            destination: destination.to_owned(),
            price,
            image: image.to_owned(),
            is_active: self.is_active,
        })
    }
}

impl State for TripFormInput {}

#[derive(Debug, Clone, Default)]
pub struct TripFormCompute {
    pub status: SubmitStatus,
}

impl Compute for TripFormCompute {}

/// Creates or updates the trip in [`TripFormInput`], then returns to the list.
#[derive(Debug, Default)]
pub struct SaveTripCommand;

impl Command for SaveTripCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let form = snap.state::<TripFormInput>();
        let editing = form.editing;
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                info!("SaveTripCommand: {message}");
                updater.set(TripFormCompute {
                    status: SubmitStatus::Failed(message),
                });
                return Box::pin(async {});
            }
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);

        updater.set(TripFormCompute {
            status: SubmitStatus::Submitting,
        });

        Box::pin(async move {
            let result = match (session, editing) {
                (Ok(session), Some(id)) => api::update_trip(&api_url, &session, &id, &payload).await,
                (Ok(session), None) => api::create_trip(&api_url, &session, &payload).await,
                (Err(err), _) => Err(err),
            };
            match result {
                Ok(()) => {
                    let message = if editing.is_some() {
                        "Trip updated successfully!"
                    } else {
                        "Trip created successfully!"
                    };
                    info!("SaveTripCommand: {message}");
                    updater.set(TripFormInput::default());
                    updater.set(TripFormCompute {
                        status: SubmitStatus::Done(message.to_owned()),
                    });
                    updater.set(TripsList::default());
                    updater.set(TripDetail::default());
                    updater.set(Route::Trips);
                }
                Err(err) => {
                    error!("SaveTripCommand: {err}");
                    updater.set(TripFormCompute {
                        status: SubmitStatus::Failed(err.to_string()),
                    });
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TripFormInput {
        TripFormInput {
            name: "Big Five Safari".to_owned(),
            destination: "Kruger".to_owned(),
            price: "3200".to_owned(),
            image: "https://img.example/kruger.jpg".to_owned(),
            ..TripFormInput::for_target(None)
        }
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut form = filled();
        form.image = "   ".to_owned();
        assert_eq!(form.validate().unwrap_err(), FILL_REQUIRED_FIELDS);
    }

    #[test]
    fn non_positive_or_non_numeric_price_is_rejected() {
        for price in ["0", "-5", "abc", "NaN"] {
            let mut form = filled();
            form.price = price.to_owned();
            assert_eq!(form.validate().unwrap_err(), PRICE_NOT_POSITIVE, "price {price}");
        }
    }

    #[test]
    fn valid_form_becomes_payload() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.price, 3200.0);
        assert!(payload.is_active);
    }

    #[test]
    fn editing_prefills_from_trip() {
        let trip = Trip {
            id: Ustr::from("t9"),
            name: Some("Okavango".to_owned()),
            price: Some(999.0),
            is_active: false,
            ..Trip::default()
        };
        let form = TripFormInput::from_trip(&trip);

        assert_eq!(form.editing, Some(Ustr::from("t9")));
        assert_eq!(form.price, "999");
        assert!(!form.is_active);
        assert!(form.destination.is_empty());
    }
}
