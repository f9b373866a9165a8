//! Server construction and dependency wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use qrtixpro::domain::UserRegistryService;
use qrtixpro::inbound::http::build_app;
use qrtixpro::inbound::http::state::HttpState;
use qrtixpro::outbound::persistence::{
    MongoLoginEventRepository, MongoStore, MongoUserRepository,
};

/// Wire the MongoDB adapters into the registry service and handler state.
#[must_use]
pub fn build_http_state(store: &MongoStore) -> web::Data<HttpState> {
    let service = UserRegistryService::new(
        Arc::new(MongoUserRepository::new(store.database())),
        Arc::new(MongoLoginEventRepository::new(store.database())),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

/// Construct an Actix HTTP server for the given state and listener settings.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    http_state: web::Data<HttpState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind((settings.host(), settings.port()))?
        .run();

    info!(
        host = settings.host(),
        port = settings.port(),
        "http listener bound"
    );
    Ok(server)
}
