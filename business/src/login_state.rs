//! Sign-in flow and the session every API call is made with.
//!
//! `LoginCommand` exchanges email and password for a bearer token at
//! `/auth/login`. The token lives in [`AuthCompute`] as a [`Session`]; the UI
//! persists it through eframe storage and restores it on start while it is
//! still valid.

use chrono::{DateTime, TimeDelta, Utc};
use log::{error, info};
use safari_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, LatestOnlyUpdater, State,
    Time,
};
use serde::{Deserialize, Serialize};

use crate::api::{self, ApiError, ApiResult};
use crate::{
    BookingDetail, BookingsList, BusinessConfig, DashboardCompute, Route, TripDetail, TripsList,
    UsersList,
};

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    /// Display name from the login response, when the backend sent one.
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl State for LoginInput {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    NotAuthenticated,
    Authenticating,
    Authenticated(Session),
    Failed(String),
}

/// Written by [`LoginCommand`] and [`LogoutCommand`], or by the UI when it
/// restores a persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCompute {
    pub status: AuthStatus,
}

impl AuthCompute {
    pub fn authenticated(session: Session) -> Self {
        Self {
            status: AuthStatus::Authenticated(session),
        }
    }

    /// The session while it has not expired.
    pub fn session_at(&self, now: DateTime<Utc>) -> Option<&Session> {
        match &self.status {
            AuthStatus::Authenticated(session) if !session.is_expired_at(now) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.session_at(now).is_some()
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticating)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl Compute for AuthCompute {}

/// Session for an API call made from a command, checked against the frame time.
pub fn require_session(snap: &CommandSnapshot) -> ApiResult<Session> {
    let now = *snap.state::<Time>().as_ref();
    snap.compute::<AuthCompute>()
        .session_at(now)
        .cloned()
        .ok_or(ApiError::NotAuthenticated)
}

fn failed(message: impl Into<String>) -> AuthCompute {
    AuthCompute {
        status: AuthStatus::Failed(message.into()),
    }
}

#[derive(Debug, Default)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let input = snap.state::<LoginInput>().clone();
        let api_url = snap.state::<BusinessConfig>().api_url();
        let now = *snap.state::<Time>().as_ref();

        let email = input.email.trim().to_owned();
        if email.is_empty() || input.password.is_empty() {
            info!("LoginCommand: missing email or password");
            updater.set(failed(FILL_ALL_FIELDS));
            return Box::pin(async {});
        }

        info!("LoginCommand: signing in {email}");
        updater.set(AuthCompute {
            status: AuthStatus::Authenticating,
        });

        Box::pin(async move {
            match api::login(&api_url, &email, &input.password).await {
                Ok(response) => {
                    let expires_at = response
                        .expires_in
                        .and_then(TimeDelta::try_seconds)
                        .and_then(|ttl| now.checked_add_signed(ttl));
                    let user_name = response
                        .user
                        .as_ref()
                        .and_then(|user| user.get("name"))
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned);

                    info!("LoginCommand: signed in {email}");
                    updater.set(LoginInput {
                        email: email.clone(),
                        password: String::new(),
                    });
                    updater.set(AuthCompute::authenticated(Session {
                        token: response.token,
                        email,
                        user_name,
                        expires_at,
                    }));
                    updater.set(Route::Dashboard);
                }
                Err(err) => {
                    error!("LoginCommand: {err}");
                    updater.set(failed(err.to_string()));
                }
            }
        })
    }
}

/// Drops the session and every cached list so the next sign-in starts clean.
#[derive(Debug, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(
        &self,
        _snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        info!("LogoutCommand: signing out");
        updater.set(AuthCompute::default());
        updater.set(Route::Login);
        updater.set(UsersList::default());
        updater.set(BookingsList::default());
        updater.set(TripsList::default());
        updater.set(BookingDetail::default());
        updater.set(TripDetail::default());
        updater.set(DashboardCompute::default());
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            token: "tok".to_owned(),
            email: "ops@safari.example".to_owned(),
            user_name: None,
            expires_at,
        }
    }

    #[test]
    fn expired_session_counts_as_logged_out() {
        let auth = AuthCompute::authenticated(session(Some(at(12))));

        assert!(auth.is_authenticated_at(at(11)));
        assert!(!auth.is_authenticated_at(at(12)));
        assert!(auth.session_at(at(13)).is_none());
    }

    #[test]
    fn session_without_expiry_never_expires() {
        let auth = AuthCompute::authenticated(session(None));
        assert!(auth.is_authenticated_at(at(23)));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut session = session(None);
        assert_eq!(session.display_name(), "ops@safari.example");
        session.user_name = Some("Ops Desk".to_owned());
        assert_eq!(session.display_name(), "Ops Desk");
    }

    #[test]
    fn failed_status_exposes_message() {
        let auth = failed("Invalid credentials");
        assert_eq!(auth.error(), Some("Invalid credentials"));
        assert!(!auth.is_authenticating());
    }
}
