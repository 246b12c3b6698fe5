//! Row actions on trips: activate / deactivate and delete.
//!
//! Both edit the cached list as it stands when the response lands instead of
//! refetching it, so overlapping actions keep each other's changes.

use log::{error, info, warn};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State,
};
use ustr::Ustr;

use crate::login_state::require_session;
use crate::{BusinessConfig, Remote, Route, SubmitStatus, TripDetail, TripsList, api};

/// Trip the next action applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripActionInput {
    pub target: Option<Ustr>,
}

impl State for TripActionInput {}

/// Outcome of the last toggle or delete, shown as a notice.
#[derive(Debug, Clone, Default)]
pub struct TripActionCompute {
    pub status: SubmitStatus,
}

impl Compute for TripActionCompute {}

fn target(snap: &CommandSnapshot, command: &str) -> Option<Ustr> {
    let target = snap.state::<TripActionInput>().target;
    if target.is_none() {
        warn!("{command}: no trip selected");
    }
    target
}

fn action_status(status: SubmitStatus) -> TripActionCompute {
    TripActionCompute { status }
}

#[derive(Debug, Default)]
pub struct ToggleTripCommand;

impl Command for ToggleTripCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let Some(id) = target(&snap, "ToggleTripCommand") else {
            return Box::pin(async {});
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);
        // A toggle still in flight gets cancelled by this dispatch; the server may
        // have applied it already, so the list is reloaded instead of patched.
        let reload = snap.compute::<TripActionCompute>().status.is_submitting();
        let detail = snap.compute::<TripDetail>().clone();

        updater.set(action_status(SubmitStatus::Submitting));

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::toggle_trip_status(&api_url, &session, &id).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(trip) => {
                    let message = if trip.is_active {
                        "Trip activated successfully"
                    } else {
                        "Trip deactivated successfully"
                    };
                    info!("ToggleTripCommand: {message} ({id})");
                    if reload {
                        updater.edit::<TripsList>(|list| list.status = Remote::Idle);
                    } else {
                        let row = trip.clone();
                        updater.edit::<TripsList>(move |list| {
                            list.replace(&row);
                        });
                    }
                    if detail.id == Some(id) {
                        updater.set(TripDetail {
                            id: Some(id),
                            status: Remote::Loaded(trip),
                        });
                    }
                    updater.set(action_status(SubmitStatus::Done(message.to_owned())));
                }
                Err(err) => {
                    error!("ToggleTripCommand: {err}");
                    updater.set(action_status(SubmitStatus::Failed(format!(
                        "Error toggling trip status: {err}"
                    ))));
                }
            }
        })
    }
}

/// Deletes the target trip. Confirmation happens in the UI before dispatch.
#[derive(Debug, Default)]
pub struct DeleteTripCommand;

impl Command for DeleteTripCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let Some(id) = target(&snap, "DeleteTripCommand") else {
            return Box::pin(async {});
        };
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);
        let leave_detail = *snap.state::<Route>() == Route::TripDetail(id);

        updater.set(action_status(SubmitStatus::Submitting));

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::delete_trip(&api_url, &session, &id).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(()) => {
                    info!("DeleteTripCommand: deleted trip {id}");
                    updater.edit::<TripsList>(move |list| {
                        list.remove(id);
                    });
                    if leave_detail {
                        updater.set(TripDetail::default());
                        updater.set(Route::Trips);
                    }
                    updater.set(TripActionInput::default());
                    updater.set(action_status(SubmitStatus::Done(
                        "Trip deleted successfully".to_owned(),
                    )));
                }
                Err(err) => {
                    error!("DeleteTripCommand: {err}");
                    updater.set(action_status(SubmitStatus::Failed(format!(
                        "Error deleting trip: {err}"
                    ))));
                }
            }
        })
    }
}
