//! MongoDB-backed `UserRepository` over the `usuarios` collection.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NationalId, UserRecord};

use super::documents::UserDocument;
use super::error_mapping::{MongoFailure, classify, map_basic_mongo_error};

/// Collection holding user records.
pub const USERS_COLLECTION: &str = "usuarios";

/// User repository relying on the unique `cedula` index for uniqueness.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Bind the repository to `database`.
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }
}

fn map_mongo_error(error: &mongodb::error::Error) -> UserPersistenceError {
    map_basic_mongo_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError> {
        let document = UserDocument::from(record);
        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(()),
            Err(err) if classify(&err) == MongoFailure::DuplicateKey => Err(
                UserPersistenceError::duplicate(record.profile().national_id().as_ref()),
            ),
            Err(err) => Err(map_mongo_error(&err)),
        }
    }

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let document = self
            .collection
            .find_one(doc! { "cedula": national_id.as_ref() })
            .await
            .map_err(|err| map_mongo_error(&err))?;
        document.map(UserRecord::try_from).transpose()
    }
}
