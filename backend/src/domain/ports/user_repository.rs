//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters must enforce national-ID uniqueness themselves (for example with
//! a unique index) and report a violation as
//! [`UserPersistenceError::Duplicate`]; the domain performs no pre-check.

use async_trait::async_trait;

use crate::domain::{NationalId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The national ID is already taken.
        Duplicate { national_id: String } =>
            "user with national id {national_id} already exists",
        /// A stored document could not be mapped back to a user record.
        Corrupt { message: String } => "stored user record is invalid: {message}",
    }
}

/// Port for the `usuarios` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record, failing with `Duplicate` when the national
    /// ID already exists.
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError>;

    /// Fetch a user by national ID.
    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;
}
