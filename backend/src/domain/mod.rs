//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`) — API error payload with stable codes.
//! - NationalId, UserProfile, NewUser, UserRecord — user identity and data.
//! - PasswordHash — Argon2id hashes in PHC form.
//! - LoginCredentials, LoginEvent — authentication input and audit record.
//! - UserRegistryService — register/login/lookup use-cases over the ports.

pub mod auth;
pub mod error;
pub mod login_event;
pub mod password;
pub mod ports;
pub mod registry_service;
pub mod trace_id;
pub mod user;

pub use self::auth::LoginCredentials;
pub use self::error::{DomainError, Error, ErrorCode, ErrorValidationError};
pub use self::login_event::{LoginAction, LoginEvent};
pub use self::password::{PasswordError, PasswordHash};
pub use self::registry_service::UserRegistryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NATIONAL_ID_MAX, NationalId, NewUser, ProfileFields, UserProfile, UserRecord,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use qrtixpro::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Usuario no encontrado"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
