//! Wiring of every state, compute and command into one [`StateCtx`].

use safari_states::{StateCtx, Time};

use crate::{
    AuthCompute, BookingDetail, BookingStats, BookingsList, BookingsPage, BusinessConfig,
    CreateBookingCommand, DashboardCompute, DeleteTripCommand, LoadBookingCommand,
    LoadTripCommand, LoginCommand, LoginInput, LogoutCommand, NewBookingCompute, NewBookingInput,
    RefreshBookingsCommand, RefreshDashboardCommand, RefreshTripsCommand, RefreshUsersCommand,
    Route, SaveTripCommand, ToggleTripCommand, TripActionCompute, TripActionInput, TripDetail,
    TripFormCompute, TripFormInput, TripStats, TripsList, TripsPage, UsersList, UsersPage,
};

pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();

    ctx.add_state(Time::default());
    ctx.add_state(config);
    ctx.add_state(Route::default());

    // Session
    ctx.add_state(LoginInput::default());
    ctx.record_compute(AuthCompute::default());

    ctx.record_compute(DashboardCompute::default());

    // Users
    ctx.add_state(UsersPage::default());
    ctx.record_compute(UsersList::default());

    // Bookings
    ctx.add_state(BookingsPage::default());
    ctx.add_state(NewBookingInput::default());
    ctx.record_compute(BookingsList::default());
    ctx.record_compute(BookingStats::default());
    ctx.record_compute(BookingDetail::default());
    ctx.record_compute(NewBookingCompute::default());

    // Trips
    ctx.add_state(TripsPage::default());
    ctx.add_state(TripFormInput::default());
    ctx.add_state(TripActionInput::default());
    ctx.record_compute(TripsList::default());
    ctx.record_compute(TripStats::default());
    ctx.record_compute(TripDetail::default());
    ctx.record_compute(TripFormCompute::default());
    ctx.record_compute(TripActionCompute::default());

    ctx.record_command(LoginCommand);
    ctx.record_command(LogoutCommand);
    ctx.record_command(RefreshDashboardCommand);
    ctx.record_command(RefreshUsersCommand);
    ctx.record_command(RefreshBookingsCommand);
    ctx.record_command(LoadBookingCommand);
    ctx.record_command(CreateBookingCommand);
    ctx.record_command(RefreshTripsCommand);
    ctx.record_command(LoadTripCommand);
    ctx.record_command(SaveTripCommand);
    ctx.record_command(ToggleTripCommand);
    ctx.record_command(DeleteTripCommand);

    ctx.sync_computes();
    ctx
}

/// Switches page and clears the transient state of the page being entered, so
/// forms open blank and stale notices do not linger.
pub fn navigate(ctx: &mut StateCtx, route: Route) {
    let updater = ctx.updater();
    match &route {
        Route::TripForm(_) => {
            *ctx.state_mut::<TripFormInput>() = TripFormInput::default();
            updater.set(TripFormCompute::default());
        }
        Route::NewBooking => {
            *ctx.state_mut::<NewBookingInput>() = NewBookingInput::default();
            updater.set(NewBookingCompute::default());
        }
        Route::Trips | Route::TripDetail(_) => {
            ctx.state_mut::<TripsPage>().confirm_delete = None;
            updater.set(TripActionCompute::default());
        }
        _ => {}
    }
    *ctx.state_mut::<Route>() = route;
}

/// Runs queued commands to completion and applies their results.
#[cfg(not(target_arch = "wasm32"))]
pub async fn flush_and_await(ctx: &mut StateCtx) {
    ctx.sync_computes();
    ctx.flush_commands();
    ctx.join_tasks().await;
}
