//! MongoDB-backed `LoginEventRepository` over the append-only `logs`
//! collection.

use async_trait::async_trait;
use mongodb::{Collection, Database};

use crate::domain::LoginEvent;
use crate::domain::ports::{LoginEventPersistenceError, LoginEventRepository};

use super::documents::LoginEventDocument;
use super::error_mapping::map_basic_mongo_error;

/// Collection holding login events.
pub const LOGIN_EVENTS_COLLECTION: &str = "logs";

/// Login event repository; every append inserts a new document.
#[derive(Clone)]
pub struct MongoLoginEventRepository {
    collection: Collection<LoginEventDocument>,
}

impl MongoLoginEventRepository {
    /// Bind the repository to `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(LOGIN_EVENTS_COLLECTION),
        }
    }
}

#[async_trait]
impl LoginEventRepository for MongoLoginEventRepository {
    async fn append(&self, event: &LoginEvent) -> Result<(), LoginEventPersistenceError> {
        self.collection
            .insert_one(LoginEventDocument::from(event))
            .await
            .map(|_| ())
            .map_err(|err| {
                map_basic_mongo_error(
                    &err,
                    LoginEventPersistenceError::query,
                    LoginEventPersistenceError::connection,
                )
            })
    }
}
