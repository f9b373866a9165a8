//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers the three registry endpoints
//! together with the response envelope and request schemas.
//!
//! The generated specification is exported via `cargo run --bin openapi-dump`
//! for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::envelope::{ApiEnvelope, EnvelopeStatus, UserProfileResponse};
use crate::inbound::http::users::{LoginRequest, LookupRequest, RegisterRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "qrtixpro user registry API",
        description = "Registration, login and lookup of qrtixpro users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::find_user,
    ),
    components(schemas(
        ApiEnvelope,
        EnvelopeStatus,
        UserProfileResponse,
        RegisterRequest,
        LoginRequest,
        LookupRequest
    )),
    tags(
        (name = "usuarios", description = "User registry operations")
    )
)]
pub struct ApiDoc;
