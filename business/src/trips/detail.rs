use log::{error, info, warn};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater,
};
use ustr::Ustr;

use crate::login_state::require_session;
use crate::models::Trip;
use crate::{BusinessConfig, Remote, Route, TripFormInput, api};

#[derive(Debug, Clone, Default)]
pub struct TripDetail {
    pub id: Option<Ustr>,
    pub status: Remote<Trip>,
}

impl TripDetail {
    pub fn needs_fetch(&self, id: Ustr) -> bool {
        self.id != Some(id) || self.status.is_idle()
    }
}

impl Compute for TripDetail {}

/// Loads the trip named by the route. On the edit form the loaded trip also
/// prefills [`TripFormInput`].
#[derive(Debug, Default)]
pub struct LoadTripCommand;

impl Command for LoadTripCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let (id, prefill_form) = match snap.state::<Route>() {
            Route::TripDetail(id) => (*id, false),
            Route::TripForm(Some(id)) => (*id, true),
            other => {
                warn!("LoadTripCommand: route {other:?} has no trip id");
                return Box::pin(async {});
            }
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);

        updater.set(TripDetail {
            id: Some(id),
            status: Remote::Loading,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::get_trip(&api_url, &session, &id).await,
                Err(err) => Err(err),
            };
            let status = match result {
                Ok(trip) => {
                    info!("LoadTripCommand: loaded trip {id}");
                    if prefill_form {
                        updater.set(TripFormInput::from_trip(&trip));
                    }
                    Remote::Loaded(trip)
                }
                Err(err) => {
                    error!("LoadTripCommand: {err}");
                    Remote::Error(err.to_string())
                }
            };
            updater.set(TripDetail {
                id: Some(id),
                status,
            });
        })
    }
}
