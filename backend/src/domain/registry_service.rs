//! User registry service: registration, login, and lookup.
//!
//! The service owns the password policy (Argon2id hashing on write,
//! verification on login) and the login audit trail. Uniqueness of the
//! national ID is delegated to the repository, which reports a duplicate as
//! a conflict; there is no separate existence check before inserting.
//!
//! Rejected logins cost one Argon2id verification whether or not the
//! national ID exists, so response timing does not reveal registered IDs.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    LoginEventRepository, LoginService, UserLookupQuery, UserPersistenceError, UserRegistration,
    UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, LoginEvent, NationalId, NewUser, PasswordError, PasswordHash,
    UserProfile, UserRecord,
};

pub(crate) const DUPLICATE_NATIONAL_ID: &str = "Ya existe un usuario con esta cédula";
pub(crate) const REGISTRATION_FAILED: &str = "Error al registrar usuario";
pub(crate) const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub(crate) const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub(crate) const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub(crate) const LOOKUP_FAILED: &str = "Error al consultar usuario";

/// Domain service implementing the registry use-cases.
///
/// Generic over the repository adapters so tests can plug in doubles while
/// the server wires the MongoDB implementations.
#[derive(Clone)]
pub struct UserRegistryService<U, E> {
    users: Arc<U>,
    login_events: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> UserRegistryService<U, E> {
    /// Create a new service over the given repositories.
    #[must_use]
    pub fn new(users: Arc<U>, login_events: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            login_events,
            clock,
        }
    }
}

#[async_trait]
impl<U, E> UserRegistration for UserRegistryService<U, E>
where
    U: UserRepository,
    E: LoginEventRepository,
{
    async fn register(&self, user: NewUser) -> Result<(), Error> {
        let (profile, password) = user.into_parts();
        let password_hash = run_blocking(move || PasswordHash::hash(&password))
            .await?
            .map_err(|err| map_password_error(&err, REGISTRATION_FAILED))?;

        let record = UserRecord::new(profile, password_hash);
        self.users
            .insert(&record)
            .await
            .map_err(map_registration_error)?;

        info!(national_id = %record.profile().national_id(), "user registered");
        Ok(())
    }
}

#[async_trait]
impl<U, E> LoginService for UserRegistryService<U, E>
where
    U: UserRepository,
    E: LoginEventRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error> {
        let record = self
            .users
            .find_by_national_id(credentials.national_id())
            .await
            .map_err(|err| map_read_error(&err, LOGIN_FAILED))?;

        let stored_hash = record
            .as_ref()
            .and_then(|found| found.password_hash().cloned());
        if let Some(found) = record
            .as_ref()
            .filter(|found| found.password_hash().is_none())
        {
            warn!(
                national_id = %found.profile().national_id(),
                "stored user has no password hash; rejecting login"
            );
        }

        // Unknown users and hash-less records still pay for one verification.
        let password = zeroize::Zeroizing::new(credentials.password().to_owned());
        let matches = run_blocking(move || {
            stored_hash.map_or_else(
                || PasswordHash::verify_fallback(&password).map(|()| false),
                |hash| hash.verify(&password),
            )
        })
        .await?
        .map_err(|err| map_password_error(&err, LOGIN_FAILED))?;

        let Some(record) = record.filter(|_| matches) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let profile = record.into_profile();
        let event = LoginEvent::login(profile.national_id().clone(), self.clock.utc());
        if let Err(err) = self.login_events.append(&event).await {
            warn!(
                national_id = %profile.national_id(),
                error = %err,
                "failed to record login event"
            );
        }

        Ok(profile)
    }
}

#[async_trait]
impl<U, E> UserLookupQuery for UserRegistryService<U, E>
where
    U: UserRepository,
    E: LoginEventRepository,
{
    async fn find_user(&self, national_id: &NationalId) -> Result<UserProfile, Error> {
        self.users
            .find_by_national_id(national_id)
            .await
            .map_err(|err| map_read_error(&err, LOOKUP_FAILED))?
            .map(UserRecord::into_profile)
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

/// Run CPU-bound password work on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        error!(error = %err, "password task did not complete");
        Error::internal("Error interno del servidor")
    })
}

fn map_registration_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Duplicate { .. } => Error::conflict(DUPLICATE_NATIONAL_ID),
        other => {
            error!(error = %other, "user insert failed");
            Error::internal(REGISTRATION_FAILED)
        }
    }
}

fn map_read_error(err: &UserPersistenceError, message: &'static str) -> Error {
    error!(error = %err, "user read failed");
    Error::internal(message)
}

fn map_password_error(err: &PasswordError, message: &'static str) -> Error {
    error!(error = %err, "password operation failed");
    Error::internal(message)
}

#[cfg(test)]
#[path = "registry_service_tests.rs"]
mod tests;
