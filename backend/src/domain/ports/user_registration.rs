//! Driving port for the registration use-case.

use async_trait::async_trait;

use crate::domain::{Error, NewUser};

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Store a new user, failing with a conflict when the national ID is taken.
    async fn register(&self, user: NewUser) -> Result<(), Error>;
}
