//! Customer accounts list.

use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State,
};

use crate::data_table::{TableView, next_revision};
use crate::login_state::require_session;
use crate::models::User;
use crate::{BusinessConfig, Remote, api};

#[derive(Debug, Clone, Default)]
pub struct UsersList {
    pub status: Remote<Vec<User>>,
    pub revision: u64,
}

impl UsersList {
    pub fn rows(&self) -> &[User] {
        self.status.value().map(Vec::as_slice).unwrap_or_default()
    }
}

impl Compute for UsersList {}

/// Table state of the users page.
#[derive(Debug, Clone, Default)]
pub struct UsersPage {
    pub table: TableView,
}

impl State for UsersPage {}

#[derive(Debug, Default)]
pub struct RefreshUsersCommand;

impl Command for RefreshUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let api_url = snap.state::<BusinessConfig>().api_url();
        let revision = snap.compute::<UsersList>().revision;
        let session = require_session(&snap);

        updater.set(UsersList {
            status: Remote::Loading,
            revision,
        });

        Box::pin(async move {
            let result = match session {
                Ok(session) => api::list_users(&api_url, &session).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(users) => {
                    info!("RefreshUsersCommand: loaded {} users", users.len());
                    updater.set(UsersList {
                        status: Remote::Loaded(users),
                        revision: next_revision(),
                    });
                }
                Err(err) => {
                    error!("RefreshUsersCommand: {err}");
                    updater.set(UsersList {
                        status: Remote::Error(err.to_string()),
                        revision,
                    });
                }
            }
        })
    }
}
