//! Business layer of the Adventure Safari admin console.
//!
//! Domain models, the admin API client, the table view logic and every
//! state / compute / command the UI drives through [`safari_states::StateCtx`].

pub mod api;
mod bookings;
mod config;
mod context;
mod dashboard;
pub mod data_table;
pub mod http;
mod login_state;
pub mod models;
mod remote;
mod route;
mod trips;
mod users;

pub use api::{ApiError, ApiResult};
pub use bookings::{
    BookingDetail, BookingStats, BookingsList, BookingsPage, CreateBookingCommand,
    FILL_REQUIRED_FIELDS, LoadBookingCommand, NewBookingCompute, NewBookingInput,
    RefreshBookingsCommand,
};
pub use config::BusinessConfig;
#[cfg(not(target_arch = "wasm32"))]
pub use context::flush_and_await;
pub use context::{build_state_ctx, navigate};
pub use dashboard::{DashboardCompute, RefreshDashboardCommand};
pub use login_state::{
    AuthCompute, AuthStatus, FILL_ALL_FIELDS, LoginCommand, LoginInput, LogoutCommand, Session,
    require_session,
};
pub use remote::{Remote, SubmitStatus};
pub use route::Route;
pub use trips::{
    DeleteTripCommand, LoadTripCommand, PRICE_NOT_POSITIVE, RefreshTripsCommand, SaveTripCommand,
    ToggleTripCommand, TripActionCompute, TripActionInput, TripDetail, TripFormCompute,
    TripFormInput, TripStats, TripsList, TripsPage,
};
pub use users::{RefreshUsersCommand, UsersList, UsersPage};
