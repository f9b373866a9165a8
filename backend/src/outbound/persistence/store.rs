//! MongoDB client construction and startup checks.
//!
//! The driver manages its own connection pool; this module only builds the
//! client with bounded timeouts, verifies the server is reachable, and makes
//! sure the unique `cedula` index exists before the listener starts.

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use super::StoreConfig;
use super::documents::UserDocument;
use super::mongo_user_repository::USERS_COLLECTION;

/// Name of the unique index on `usuarios.cedula`.
pub const NATIONAL_ID_INDEX: &str = "cedula_unique";

const APP_NAME: &str = "qrtixpro";

/// Errors raised while connecting to or preparing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or the client not built.
    #[error("failed to configure mongodb client: {message}")]
    Configure {
        /// Driver error text.
        message: String,
    },

    /// The server did not answer a ping within the configured timeout.
    #[error("failed to reach mongodb: {message}")]
    Unreachable {
        /// Driver error text.
        message: String,
    },

    /// Creating the unique national ID index failed.
    #[error("failed to ensure unique index on {collection}.cedula: {message}")]
    Index {
        /// Collection the index belongs to.
        collection: &'static str,
        /// Driver error text.
        message: String,
    },
}

/// Handle to the registry database.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client for `config` and verify the server answers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configure`] for an invalid URI and
    /// [`StoreError::Unreachable`] when the ping times out or fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options =
            ClientOptions::parse(config.uri())
                .await
                .map_err(|err| StoreError::Configure {
                    message: err.to_string(),
                })?;
        options.app_name = Some(APP_NAME.to_owned());
        options.server_selection_timeout = Some(config.timeout());
        options.connect_timeout = Some(config.timeout());

        let client = Client::with_options(options).map_err(|err| StoreError::Configure {
            message: err.to_string(),
        })?;
        let database = client.database(config.database());
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| StoreError::Unreachable {
                message: err.to_string(),
            })?;

        info!(database = config.database(), "connected to mongodb");
        Ok(Self { database })
    }

    /// Create the unique index on `usuarios.cedula` if it is missing.
    ///
    /// Index creation is idempotent for an identical specification.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "cedula": 1 })
            .options(
                IndexOptions::builder()
                    .name(NATIONAL_ID_INDEX.to_owned())
                    .unique(true)
                    .build(),
            )
            .build();

        self.database
            .collection::<UserDocument>(USERS_COLLECTION)
            .create_index(index)
            .await
            .map_err(|err| StoreError::Index {
                collection: USERS_COLLECTION,
                message: err.to_string(),
            })?;

        info!(index = NATIONAL_ID_INDEX, "unique national id index ready");
        Ok(())
    }

    /// Database holding the registry collections.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }
}
