use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State,
};
use ustr::Ustr;

use crate::login_state::require_session;
use crate::models::{GuestInput, NewBookingPayload};
use crate::{BookingsList, BusinessConfig, Route, SubmitStatus, api};

pub const FILL_REQUIRED_FIELDS: &str = "Please fill in all required fields";

/// The new-booking form. Always holds at least one guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookingInput {
    pub user_id: Option<Ustr>,
    pub trip_id: Option<Ustr>,
    /// `YYYY-MM-DD`.
    pub travel_date: String,
    pub guests: Vec<GuestInput>,
}

impl Default for NewBookingInput {
    fn default() -> Self {
        Self {
            user_id: None,
            trip_id: None,
            travel_date: String::new(),
            guests: vec![GuestInput::default()],
        }
    }
}

impl NewBookingInput {
    pub fn add_guest(&mut self) {
        self.guests.push(GuestInput::default());
    }

    /// Ignored for the last remaining guest.
    pub fn remove_guest(&mut self, index: usize) {
        if self.guests.len() > 1 && index < self.guests.len() {
            self.guests.remove(index);
        }
    }

    pub fn validate(&self) -> Result<NewBookingPayload, String> {
        let (Some(user_id), Some(trip_id)) = (self.user_id, self.trip_id) else {
            return Err(FILL_REQUIRED_FIELDS.to_owned());
        };
        let travel_date = self.travel_date.trim();
        if travel_date.is_empty() {
            return Err(FILL_REQUIRED_FIELDS.to_owned());
        }
        if let Some(index) = self.guests.iter().position(|guest| !guest.is_complete()) {
            return Err(format!("Please fill in all details for Guest {}", index + 1));
        }

        Ok(NewBookingPayload {
            user_id,
            trip_id,
            guests: self
                .guests
                .iter()
                .map(|guest| GuestInput {
                    name: guest.name.trim().to_owned(),
                    age: guest.age.trim().to_owned(),
                    passport: guest.passport.trim().to_owned(),
                })
                .collect(),
            travel_date: travel_date.to_owned(),
        })
    }
}

impl State for NewBookingInput {}

#[derive(Debug, Clone, Default)]
pub struct NewBookingCompute {
    pub status: SubmitStatus,
}

impl Compute for NewBookingCompute {}

/// Validates and posts the new-booking form, then returns to the bookings list.
#[derive(Debug, Default)]
pub struct CreateBookingCommand;

impl Command for CreateBookingCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let payload = match snap.state::<NewBookingInput>().validate() {
            Ok(payload) => payload,
            Err(message) => {
                info!("CreateBookingCommand: {message}");
                updater.set(NewBookingCompute {
                    status: SubmitStatus::Failed(message),
                });
                return Box::pin(async {});
            }
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);

        updater.set(NewBookingCompute {
            status: SubmitStatus::Submitting,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::create_booking(&api_url, &session, &payload).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(()) => {
                    info!("CreateBookingCommand: booking created for {}", payload.user_id);
                    updater.set(NewBookingInput::default());
                    updater.set(NewBookingCompute {
                        status: SubmitStatus::Done("Booking created successfully!".to_owned()),
                    });
                    updater.set(BookingsList::default());
                    updater.set(Route::Bookings);
                }
                Err(err) => {
                    error!("CreateBookingCommand: {err}");
                    updater.set(NewBookingCompute {
                        status: SubmitStatus::Failed(err.to_string()),
                    });
                }
            }
        })
    }
}
