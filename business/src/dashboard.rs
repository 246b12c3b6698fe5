//! Overview cards and charts from `/dashboard/stats`.

use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater,
};

use crate::login_state::require_session;
use crate::models::DashboardStats;
use crate::{BusinessConfig, Remote, api};

#[derive(Debug, Clone, Default)]
pub struct DashboardCompute {
    pub status: Remote<DashboardStats>,
}

impl Compute for DashboardCompute {}

#[derive(Debug, Default)]
pub struct RefreshDashboardCommand;

impl Command for RefreshDashboardCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let api_url = snap.state::<BusinessConfig>().api_url();
        let session = require_session(&snap);

        updater.set(DashboardCompute {
            status: Remote::Loading,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::dashboard_stats(&api_url, &session).await,
                Err(err) => Err(err),
            };
            let status = match result {
                Ok(stats) => {
                    info!(
                        "RefreshDashboardCommand: loaded {} cards",
                        stats.card_data.len()
                    );
                    Remote::Loaded(stats)
                }
                Err(err) => {
                    error!("RefreshDashboardCommand: {err}");
                    Remote::Error(err.to_string())
                }
            };
            updater.set(DashboardCompute { status });
        })
    }
}
