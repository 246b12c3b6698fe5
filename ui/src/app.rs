use chrono::Utc;
use safari_business::{AuthCompute, Route, Session};
use safari_states::Time;

use crate::{pages, state::State, widgets};

/// Storage key of the persisted session.
pub const SESSION_KEY: &str = "safari_session";

/// Route to switch to when `route` does not fit the session, `None` otherwise.
fn guarded_route(signed_in: bool, route: &Route) -> Option<Route> {
    match (signed_in, *route == Route::Login) {
        (false, false) => Some(Route::Login),
        (true, true) => Some(Route::Dashboard),
        _ => None,
    }
}

pub struct SafariApp {
    state: State,
}

impl SafariApp {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Like [`SafariApp::new`], but signs back in with the session saved by the
    /// last run while it is still valid.
    pub fn with_storage(cc: &eframe::CreationContext<'_>, state: State) -> Self {
        let mut app = Self::new(state);
        let saved = cc
            .storage
            .and_then(|storage| eframe::get_value::<Option<Session>>(storage, SESSION_KEY))
            .flatten();
        if let Some(session) = saved {
            app.restore(session);
        }
        app
    }

    fn restore(&mut self, session: Session) {
        if session.is_expired_at(Utc::now()) {
            log::info!("Saved session for {} expired", session.email);
            return;
        }
        log::info!("Restoring session for {}", session.email);
        let ctx = &mut self.state.ctx;
        ctx.updater().set(AuthCompute::authenticated(session));
        *ctx.state_mut::<Route>() = Route::Dashboard;
        ctx.sync_computes();
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn current_session(&self) -> Option<Session> {
        let ctx = &self.state.ctx;
        let now = *ctx.state::<Time>().as_ref();
        ctx.compute::<AuthCompute>().session_at(now).cloned()
    }

    /// Keeps the route consistent with the session: signed-out users only see
    /// the login page.
    fn guard_route(&mut self) -> bool {
        let signed_in = self.current_session().is_some();
        let ctx = &mut self.state.ctx;
        if let Some(route) = guarded_route(signed_in, ctx.state::<Route>()) {
            *ctx.state_mut::<Route>() = route;
        }
        signed_in
    }

    fn page(&mut self, ui: &mut egui::Ui) {
        let route = self.state.ctx.state::<Route>().clone();
        let state = &mut self.state;
        match route {
            Route::Login => {
                pages::login_page(state, ui);
            }
            Route::Dashboard => pages::dashboard_page(state, ui),
            Route::Users => pages::users_page(state, ui),
            Route::Bookings => pages::bookings_page(state, ui),
            Route::BookingDetail(id) => pages::booking_detail_page(state, ui, id),
            Route::NewBooking => pages::new_booking_page(state, ui),
            Route::Trips => pages::trips_page(state, ui),
            Route::TripDetail(id) => pages::trip_detail_page(state, ui, id),
            Route::TripForm(target) => pages::trip_form_page(state, ui, target),
        }
    }
}

impl eframe::App for SafariApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ctx.update::<Time>(|time| *time = Time::now());
        // Sync Compute for render
        self.state.ctx.sync_computes();

        if self.guard_route() {
            egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
                widgets::navbar(&mut self.state.ctx, ui);
            });
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.page(ui));
            });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                pages::login_page(&mut self.state, ui);
            });
        }

        // Run background jobs
        self.state.ctx.flush_commands();

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SESSION_KEY, &self.current_session());
    }
}

#[cfg(test)]
mod tests {
    use ustr::Ustr;

    use super::*;

    #[test]
    fn route_only_changes_when_it_does_not_fit_the_session() {
        assert_eq!(guarded_route(false, &Route::Trips), Some(Route::Login));
        assert_eq!(guarded_route(true, &Route::Login), Some(Route::Dashboard));
        assert_eq!(guarded_route(false, &Route::Login), None);
        assert_eq!(guarded_route(true, &Route::Trips), None);
        assert_eq!(
            guarded_route(true, &Route::TripDetail(Ustr::from("t1"))),
            None
        );
    }
}
