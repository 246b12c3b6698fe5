use std::time::Duration;

use egui_kittest::Harness;
use safari_business::{AuthCompute, Route, Session};
use safari_ui::SafariApp;
use safari_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "ui-test-token";

pub struct TestCtx<'a, T = State> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames while giving spawned commands time to answer.
    #[allow(unused)]
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        self.harness.step();
    }
}

impl<'a> TestCtx<'a, State> {
    /// Draws `page` against a signed-in [`State`], with the same per-frame
    /// sync and flush the app does.
    #[allow(unused)]
    pub async fn page(page: fn(&mut State, &mut egui::Ui)) -> Self {
        let (mock_server, mut state) = setup_test_state().await;
        sign_in(&mut state);
        let harness = Harness::new_ui_state(
            move |ui, state: &mut State| {
                state.ctx.sync_computes();
                page(state, ui);
                state.ctx.flush_commands();
            },
            state,
        );
        Self {
            mock_server,
            harness,
        }
    }
}

impl<'a> TestCtx<'a, SafariApp> {
    #[allow(unused)]
    pub async fn new_app() -> Self {
        let (mock_server, state) = setup_test_state().await;
        let app = SafariApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    /// App that starts signed in, on `route`.
    #[allow(unused)]
    pub async fn signed_in_app(route: Route) -> Self {
        let (mock_server, mut state) = setup_test_state().await;
        sign_in(&mut state);
        *state.ctx.state_mut::<Route>() = route;
        let app = SafariApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

pub fn sign_in(state: &mut State) {
    state.ctx.updater().set(AuthCompute::authenticated(Session {
        token: TOKEN.to_owned(),
        email: "ops@safari.example".to_owned(),
        user_name: Some("Ops Desk".to_owned()),
        expires_at: None,
    }));
    state.ctx.sync_computes();
}

/// Mounts a JSON response for `verb` on `route` (relative to `/api`).
#[allow(unused)]
pub async fn mock_json(
    server: &MockServer,
    verb: &str,
    route: &str,
    status: u16,
    body: serde_json::Value,
) {
    Mock::given(method(verb))
        .and(path(format!("/api{route}")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(unused)]
pub fn trip(id: &str, name: &str, active: bool) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "destination": "Serengeti",
        "price": 1500,
        "image": "https://img.example/trip.jpg",
        "isActive": active,
        "createdAt": "2024-03-05T10:00:00Z"
    })
}

async fn setup_test_state() -> (MockServer, State) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock_server = MockServer::start().await;
    let state = State::test(mock_server.uri());
    (mock_server, state)
}
