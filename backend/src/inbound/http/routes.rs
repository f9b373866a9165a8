//! Route table for the registry API.
//!
//! ```text
//! POST /api/registro         Register a user
//! POST /api/login            Authenticate a user
//! POST /api/obtener-usuario  Fetch a user profile
//! ```
//!
//! Other methods on these paths get a 405 envelope; unknown paths get the
//! 404 envelope installed by [`route_not_found`].

use actix_web::{HttpResponse, web};

use crate::domain::{ApiResult, Error};
use crate::inbound::http::error::json_config;
use crate::inbound::http::users::{find_user, login, register};

/// Message for a known path hit with the wrong method.
pub const METHOD_NOT_ALLOWED: &str = "Método no permitido";
/// Message for an unknown path.
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";

/// Register the API resources on an application or scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use qrtixpro::inbound::http::routes::{configure, route_not_found};
///
/// let app = App::new()
///     .configure(configure)
///     .default_service(web::to(route_not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::resource("/api/registro")
                .route(web::post().to(register))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/login")
                .route(web::post().to(login))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/api/obtener-usuario")
                .route(web::post().to(find_user))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Fallback for a matched path with an unsupported method.
pub async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(METHOD_NOT_ALLOWED))
}

/// Fallback for unmatched paths.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(ROUTE_NOT_FOUND))
}
