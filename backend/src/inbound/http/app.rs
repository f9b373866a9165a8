//! Application factory shared by the server and the HTTP test suites.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::cors::Cors;
use crate::inbound::http::routes::{configure, route_not_found};
use crate::inbound::http::state::HttpState;

/// Build the Actix application around the given handler state.
///
/// Middleware order, outermost first: [`Trace`], then [`Cors`], so every
/// response, including preflights and 404s, carries both the trace header
/// and the CORS headers.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(configure)
        .default_service(web::to(route_not_found))
        .wrap(Cors)
        .wrap(Trace)
}
