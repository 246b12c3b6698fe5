use std::any::TypeId;

use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, Dep, LatestOnlyUpdater,
    State, Updater,
};

use crate::data_table::{TableView, next_revision};
use crate::login_state::require_session;
use crate::models::Booking;
use crate::{BusinessConfig, Remote, api};

#[derive(Debug, Clone, Default)]
pub struct BookingsList {
    pub status: Remote<Vec<Booking>>,
    pub revision: u64,
}

impl BookingsList {
    pub fn rows(&self) -> &[Booking] {
        self.status.value().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Compute for BookingsList {}

#[derive(Debug, Clone, Default)]
pub struct BookingsPage {
    pub table: TableView,
}

impl State for BookingsPage {}

/// Summary cards above the bookings table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingStats {
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
    /// Paid registration fees of bookings that are not cancelled.
    pub revenue: f64,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        bookings.iter().fold(Self::default(), |mut stats, booking| {
            match booking.status().as_deref() {
                Some("confirmed") => stats.confirmed += 1,
                Some("pending") => stats.pending += 1,
                Some("cancelled") => stats.cancelled += 1,
                _ => {}
            }
            stats.revenue += booking.paid_registration_amount().unwrap_or_default();
            stats
        })
    }
}

impl Compute for BookingStats {
    fn deps(&self) -> Vec<TypeId> {
        vec![TypeId::of::<BookingsList>()]
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Self::from_bookings(deps.compute::<BookingsList>().rows()));
    }
}

#[derive(Debug, Default)]
pub struct RefreshBookingsCommand;

impl Command for RefreshBookingsCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let api_url = snap.state::<BusinessConfig>().api_url();
        let revision = snap.compute::<BookingsList>().revision;
        let session = require_session(&snap);

        updater.set(BookingsList {
            status: Remote::Loading,
            revision,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::list_bookings(&api_url, &session).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(bookings) => {
                    info!("RefreshBookingsCommand: loaded {} bookings", bookings.len());
                    updater.set(BookingsList {
                        status: Remote::Loaded(bookings),
                        revision: next_revision(),
                    });
                }
                Err(err) => {
                    error!("RefreshBookingsCommand: {err}");
                    updater.set(BookingsList {
                        status: Remote::Error(err.to_string()),
                        revision,
                    });
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn booking(value: serde_json::Value) -> Booking {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn statuses_are_counted_case_insensitively() {
        let bookings = vec![
            booking(json!({ "bookingStatus": "Confirmed" })),
            booking(json!({ "bookingStatus": "CONFIRMED" })),
            booking(json!({ "bookingStatus": "pending" })),
            booking(json!({ "bookingStatus": "Cancelled" })),
            booking(json!({})),
        ];

        let stats = BookingStats::from_bookings(&bookings);
        assert_eq!(stats.confirmed, 2);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.cancelled, 1);
    }

    #[test]
    fn revenue_sums_paid_fees_outside_cancelled_bookings() {
        let bookings = vec![
            booking(json!({ "bookingStatus": "confirmed", "registrationPaymentDetails": { "status": "paid", "amount": 200 } })),
            booking(json!({ "bookingStatus": "pending", "registrationPaymentDetails": { "status": "paid", "amount": 50.5 } })),
            booking(json!({ "bookingStatus": "cancelled", "registrationPaymentDetails": { "status": "paid", "amount": 900 } })),
            booking(json!({ "bookingStatus": "confirmed", "registrationPaymentDetails": { "status": "failed", "amount": 75 } })),
        ];

        assert_eq!(BookingStats::from_bookings(&bookings).revenue, 250.5);
    }

    #[test]
    fn no_bookings_means_zero_stats() {
        assert_eq!(BookingStats::from_bookings(&[]), BookingStats::default());
    }
}
