use std::any::TypeId;

use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, Dep, LatestOnlyUpdater,
    State, Updater,
};
use ustr::Ustr;

use crate::data_table::{TableView, next_revision};
use crate::login_state::require_session;
use crate::models::Trip;
use crate::{BusinessConfig, Remote, api};

#[derive(Debug, Clone, Default)]
pub struct TripsList {
    pub status: Remote<Vec<Trip>>,
    pub revision: u64,
}

impl TripsList {
    pub fn rows(&self) -> &[Trip] {
        self.status.value().map(Vec::as_slice).unwrap_or_default()
    }

    /// Swaps `trip` in for the loaded row sharing its id. Returns whether a row changed.
    pub fn replace(&mut self, trip: &Trip) -> bool {
        let Some(row) = self
            .status
            .value_mut()
            .and_then(|rows| rows.iter_mut().find(|row| row.id == trip.id))
        else {
            return false;
        };
        *row = trip.clone();
        self.revision = next_revision();
        true
    }

    /// Drops the loaded row `id`. Returns whether a row was removed.
    pub fn remove(&mut self, id: Ustr) -> bool {
        let Some(rows) = self.status.value_mut() else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return false;
        }
        self.revision = next_revision();
        true
    }
}

impl Compute for TripsList {}

#[derive(Debug, Clone, Default)]
pub struct TripsPage {
    pub table: TableView,
    /// Trip awaiting delete confirmation.
    pub confirm_delete: Option<Ustr>,
}

impl State for TripsPage {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Sum of listed prices; trips without a price count as 0.
    pub total_value: f64,
}

impl TripStats {
    pub fn from_trips(trips: &[Trip]) -> Self {
        let active = trips.iter().filter(|trip| trip.is_active).count();
        Self {
            total: trips.len(),
            active,
            inactive: trips.len() - active,
            total_value: trips.iter().filter_map(|trip| trip.price).sum(),
        }
    }
}

impl Compute for TripStats {
    fn deps(&self) -> Vec<TypeId> {
        vec![TypeId::of::<TripsList>()]
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        updater.set(Self::from_trips(deps.compute::<TripsList>().rows()));
    }
}

#[derive(Debug, Default)]
pub struct RefreshTripsCommand;

impl Command for RefreshTripsCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let api_url = snap.state::<BusinessConfig>().api_url();
        let revision = snap.compute::<TripsList>().revision;
        let session = require_session(&snap);

        updater.set(TripsList {
            status: Remote::Loading,
            revision,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::list_trips(&api_url, &session).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(trips) => {
                    info!("RefreshTripsCommand: loaded {} trips", trips.len());
                    updater.set(TripsList {
                        status: Remote::Loaded(trips),
                        revision: next_revision(),
                    });
                }
                Err(err) => {
                    error!("RefreshTripsCommand: {err}");
                    updater.set(TripsList {
                        status: Remote::Error(err.to_string()),
                        revision,
                    });
                }
            }
        })
    }
}
