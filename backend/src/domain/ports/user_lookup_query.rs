//! Driving port for reading a single user profile.

use async_trait::async_trait;

use crate::domain::{Error, NationalId, UserProfile};

/// Domain use-case port for user lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookupQuery: Send + Sync {
    /// Return the profile stored under `national_id`.
    async fn find_user(&self, national_id: &NationalId) -> Result<UserProfile, Error>;
}
