//! User registry handlers.
//!
//! ```text
//! POST /api/registro {"cedula":"001","nombres":"Ana","contrasena":"secret"}
//! POST /api/login {"cedula":"001","contrasena":"secret"}
//! POST /api/obtener-usuario {"cedula":"001"}
//! ```
//!
//! Handlers decode the body, validate it into domain values, and delegate to
//! the driving ports held in [`HttpState`].

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, Error, LoginCredentials, NationalId, NewUser, ProfileFields, UserValidationError,
};
use crate::inbound::http::envelope::{ApiEnvelope, UserProfileResponse};
use crate::inbound::http::state::HttpState;

/// Message for a successful registration.
pub const REGISTERED: &str = "Usuario registrado con éxito";
/// Message for a successful login.
pub const LOGGED_IN: &str = "Inicio de sesión exitoso";
/// Message for a successful lookup.
pub const FOUND: &str = "Usuario encontrado";

/// Registration body for `POST /api/registro`.
///
/// Missing fields decode as empty strings.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Given names.
    pub nombres: String,
    /// Surnames.
    pub apellidos: String,
    /// National ID; trimmed, required and unique.
    pub cedula: String,
    /// Contact email, stored as given.
    pub correo: String,
    /// Contact phone, stored as given.
    pub telefono: String,
    /// Plaintext password; only its Argon2id hash is stored.
    pub contrasena: String,
    /// Photo reference or inline data, stored as given.
    pub foto: String,
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let RegisterRequest {
            nombres,
            apellidos,
            cedula,
            correo,
            telefono,
            contrasena,
            foto,
        } = value;
        let fields = ProfileFields {
            given_names: nombres,
            surnames: apellidos,
            national_id: cedula,
            email: correo,
            phone: telefono,
            photo: foto,
        };
        Self::try_new(fields, &contrasena)
    }
}

/// Login body for `POST /api/login`.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// National ID of the account.
    pub cedula: String,
    /// Plaintext password to verify.
    pub contrasena: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = UserValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.cedula, &value.contrasena)
    }
}

/// Lookup body for `POST /api/obtener-usuario`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LookupRequest {
    /// National ID to look up.
    pub cedula: String,
}

fn map_validation_error(err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/registro",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiEnvelope),
        (status = 400, description = "Invalid request", body = ApiEnvelope),
        (status = 409, description = "National ID already registered", body = ApiEnvelope),
        (status = 500, description = "Store failure", body = ApiEnvelope)
    ),
    tags = ["usuarios"],
    operation_id = "registrarUsuario"
)]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = NewUser::try_from(payload.into_inner()).map_err(|err| map_validation_error(&err))?;
    state.registration.register(user).await?;
    Ok(HttpResponse::Created().json(ApiEnvelope::success(REGISTERED)))
}

/// Authenticate a user by national ID and password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success with the user profile", body = ApiEnvelope),
        (status = 400, description = "Invalid request", body = ApiEnvelope),
        (status = 401, description = "Invalid credentials", body = ApiEnvelope),
        (status = 500, description = "Store failure", body = ApiEnvelope)
    ),
    tags = ["usuarios"],
    operation_id = "login"
)]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(|err| map_validation_error(&err))?;
    let profile = state.login.authenticate(&credentials).await?;
    Ok(HttpResponse::Ok().json(ApiEnvelope::success_with(
        LOGGED_IN,
        UserProfileResponse::from(profile),
    )))
}

/// Fetch a user profile by national ID.
#[utoipa::path(
    post,
    path = "/api/obtener-usuario",
    request_body = LookupRequest,
    responses(
        (status = 200, description = "User profile", body = ApiEnvelope),
        (status = 400, description = "Invalid request", body = ApiEnvelope),
        (status = 404, description = "Unknown national ID", body = ApiEnvelope),
        (status = 500, description = "Store failure", body = ApiEnvelope)
    ),
    tags = ["usuarios"],
    operation_id = "obtenerUsuario"
)]
pub async fn find_user(
    state: web::Data<HttpState>,
    payload: web::Json<LookupRequest>,
) -> ApiResult<HttpResponse> {
    let national_id =
        NationalId::new(payload.into_inner().cedula).map_err(|err| map_validation_error(&err))?;
    let profile = state.lookup.find_user(&national_id).await?;
    Ok(HttpResponse::Ok().json(ApiEnvelope::success_with(
        FOUND,
        UserProfileResponse::from(profile),
    )))
}

#[cfg(test)]
mod tests;
