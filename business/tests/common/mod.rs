//! Shared harness: a wiremock backend and a fully wired `StateCtx` pointed at it.

#![allow(dead_code)]

use safari_business::{AuthCompute, BusinessConfig, Session, build_state_ctx, flush_and_await};
use safari_states::StateCtx;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub struct TestContext {
    pub server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let server = MockServer::start().await;
        let ctx = build_state_ctx(BusinessConfig::new(server.uri()));
        Self { server, ctx }
    }

    pub async fn authenticated() -> Self {
        let mut test = Self::new().await;
        test.ctx.updater().set(AuthCompute::authenticated(Session {
            token: TOKEN.to_owned(),
            email: "ops@safari.example".to_owned(),
            user_name: Some("Ops Desk".to_owned()),
            expires_at: None,
        }));
        test.ctx.sync_computes();
        test
    }

    pub async fn flush_and_wait(&mut self) {
        flush_and_await(&mut self.ctx).await;
    }

    /// Authorized request answered with `status` and `body`.
    pub async fn mock(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

pub fn trip(id: &str, name: &str, destination: &str, active: bool) -> Value {
    json!({
        "_id": id,
        "name": name,
        "destination": destination,
        "price": 1500,
        "image": format!("https://img.example/{id}.jpg"),
        "isActive": active,
        "createdAt": "2025-01-10T08:00:00.000Z",
        "updatedAt": "2025-01-10T08:00:00.000Z",
    })
}

pub fn booking(id: &str, status: &str, payment: Option<(&str, f64)>) -> Value {
    json!({
        "_id": id,
        "bookingId": format!("BK-{id}"),
        "userId": { "_id": "u1", "name": "Achieng Odhiambo", "email": "achieng@example.com" },
        "tripId": { "_id": "t1", "name": "Great Migration", "destination": "Maasai Mara", "price": 2400 },
        "bookingDate": "2025-07-14",
        "guests": [{ "name": "Achieng", "age": 29 }],
        "bookingStatus": status,
        "registrationPaymentDetails": payment.map(|(status, amount)| json!({
            "status": status,
            "amount": amount,
            "currency": "USD",
        })),
    })
}
