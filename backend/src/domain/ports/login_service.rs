//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. HTTP handler tests substitute a mock instead of wiring
//! persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserProfile};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user's profile.
    ///
    /// Unknown national IDs and wrong passwords both yield an unauthorised
    /// error with the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserProfile, Error>;
}
