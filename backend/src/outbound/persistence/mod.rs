//! MongoDB persistence adapters.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by a MongoDB database holding two collections:
//!
//! - `usuarios`: one document per user, unique on `cedula`.
//! - `logs`: append-only login events.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   BSON documents and domain types. No business logic resides here.
//! - **Internal documents**: Document structs (`documents.rs`) are internal
//!   implementation details, never exposed to the domain layer.
//! - **Uniqueness in the store**: The unique index created by
//!   [`MongoStore::ensure_indexes`] is the only registration guard; a
//!   duplicate-key write maps to `UserPersistenceError::Duplicate`.
//! - **Strongly typed errors**: Driver errors are mapped to port error types.
//!
//! # Example
//!
//! ```no_run
//! use qrtixpro::outbound::persistence::{MongoStore, MongoUserRepository, StoreConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MongoStore::connect(&StoreConfig::new("mongodb://localhost:27017")).await?;
//! store.ensure_indexes().await?;
//! let repo = MongoUserRepository::new(store.database());
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod config;
mod documents;
mod error_mapping;
mod mongo_login_event_repository;
mod mongo_user_repository;
mod store;

pub use config::{
    DEFAULT_DATABASE, DEFAULT_TIMEOUT, MONGO_DATABASE_ENV, MONGO_TIMEOUT_ENV, MONGO_URI_ENV,
    StoreConfig, StoreConfigError, store_config_from_env,
};
pub use mongo_login_event_repository::{LOGIN_EVENTS_COLLECTION, MongoLoginEventRepository};
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
pub use store::{MongoStore, NATIONAL_ID_INDEX, StoreError};
