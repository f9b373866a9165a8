//! Port for the append-only login event log.

use async_trait::async_trait;

use crate::domain::LoginEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by login event repository adapters.
    pub enum LoginEventPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "login event repository connection failed: {message}",
        /// The append failed during execution.
        Query { message: String } => "login event repository query failed: {message}",
    }
}

/// Port for writing login events to the `logs` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginEventRepository: Send + Sync {
    /// Append one event. Duplicates are allowed.
    async fn append(&self, event: &LoginEvent) -> Result<(), LoginEventPersistenceError>;
}
