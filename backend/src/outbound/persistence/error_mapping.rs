//! Shared mapping from MongoDB driver errors to port errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

/// Server code for a unique index violation.
pub(crate) const DUPLICATE_KEY_CODE: i32 = 11000;

/// Coarse classification of a driver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MongoFailure {
    /// The server could not be reached or the connection dropped.
    Connection,
    /// A unique index rejected the write.
    DuplicateKey,
    /// Any other command or write failure.
    Query,
}

pub(crate) fn classify(error: &MongoError) -> MongoFailure {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            MongoFailure::DuplicateKey
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            MongoFailure::DuplicateKey
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => MongoFailure::Connection,
        _ => MongoFailure::Query,
    }
}

/// Map a driver error into a repository-specific connection/query error.
///
/// Duplicate-key failures are reported through `query`; repositories that
/// care about them check [`classify`] first.
pub(crate) fn map_basic_mongo_error<E, Q, C>(error: &MongoError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match classify(error) {
        MongoFailure::Connection => connection(error.to_string()),
        MongoFailure::DuplicateKey | MongoFailure::Query => query(error.to_string()),
    }
}
