//! Registry wiring over in-memory repositories.

use std::sync::Arc;

use actix_web::http::Method;
use actix_web::{test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use qrtixpro::domain::UserRegistryService;
use qrtixpro::inbound::http::build_app;
use qrtixpro::inbound::http::state::HttpState;
use qrtixpro::test_support::{FixedClock, InMemoryLoginEventRepository, InMemoryUserRepository};
use serde_json::Value;

/// Instant every login event is stamped with.
pub fn login_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Registry service, its stores, and the handler state built from them.
#[derive(Clone)]
pub struct Registry {
    pub users: Arc<InMemoryUserRepository>,
    pub login_events: Arc<InMemoryLoginEventRepository>,
    pub service: Arc<UserRegistryService<InMemoryUserRepository, InMemoryLoginEventRepository>>,
    pub state: web::Data<HttpState>,
}

impl Registry {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let login_events = Arc::new(InMemoryLoginEventRepository::new());
        let service = Arc::new(UserRegistryService::new(
            Arc::clone(&users),
            Arc::clone(&login_events),
            Arc::new(FixedClock(login_instant())),
        ));
        let state = web::Data::new(HttpState::from_service(Arc::clone(&service)));
        Self {
            users,
            login_events,
            service,
            state,
        }
    }
}

/// Captured response.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub raw_body: Vec<u8>,
}

impl Snapshot {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.raw_body).expect("json body")
    }
}

/// Send one request through a freshly built application.
pub async fn send(registry: &Registry, method: Method, uri: &str, body: Option<&str>) -> Snapshot {
    let app = actix_test::init_service(build_app(registry.state.clone())).await;
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_payload(body.to_owned());
    }
    let response = actix_test::call_service(&app, request.to_request()).await;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().expect("ascii header").to_owned(),
            )
        })
        .collect();
    let raw_body = actix_test::read_body(response).await.to_vec();
    Snapshot {
        status,
        headers,
        raw_body,
    }
}

/// POST a JSON value.
pub async fn post_json(registry: &Registry, uri: &str, body: &Value) -> Snapshot {
    send(registry, Method::POST, uri, Some(&body.to_string())).await
}
