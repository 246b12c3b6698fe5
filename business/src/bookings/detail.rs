use log::{error, info, warn};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater,
};
use ustr::Ustr;

use crate::login_state::require_session;
use crate::models::Booking;
use crate::{BusinessConfig, Remote, Route, api};

#[derive(Debug, Clone, Default)]
pub struct BookingDetail {
    /// Booking the status belongs to.
    pub id: Option<Ustr>,
    pub status: Remote<Booking>,
}

impl BookingDetail {
    /// True when the page for `id` has nothing loaded or loading yet.
    pub fn needs_fetch(&self, id: Ustr) -> bool {
        self.id != Some(id) || self.status.is_idle()
    }
}

impl Compute for BookingDetail {}

/// Loads the booking named by the current [`Route::BookingDetail`].
#[derive(Debug, Default)]
pub struct LoadBookingCommand;

impl Command for LoadBookingCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let Route::BookingDetail(id) = snap.state::<Route>().clone() else {
            warn!("LoadBookingCommand: current route has no booking id");
            return Box::pin(async {});
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);

        updater.set(BookingDetail {
            id: Some(id),
            status: Remote::Loading,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::get_booking(&api_url, &session, &id).await,
                Err(err) => Err(err),
            };
            let status = match result {
                Ok(booking) => {
                    info!("LoadBookingCommand: loaded booking {id}");
                    Remote::Loaded(booking)
                }
                Err(err) => {
                    error!("LoadBookingCommand: {err}");
                    Remote::Error(err.to_string())
                }
            };
            updater.set(BookingDetail {
                id: Some(id),
                status,
            });
        })
    }
}
