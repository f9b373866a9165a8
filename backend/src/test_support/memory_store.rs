//! In-memory repository doubles mirroring the MongoDB adapters.
//!
//! `InMemoryUserRepository` checks and inserts under one lock, the same
//! guarantee the unique `cedula` index gives the real store, so concurrent
//! registrations can be exercised without a server.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{
    LoginEventPersistenceError, LoginEventRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{LoginEvent, NationalId, UserRecord};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// User store keyed by national ID.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: Mutex<HashMap<String, UserRecord>>,
    failure: Mutex<Option<UserPersistenceError>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: UserPersistenceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored record for `national_id`, if any.
    #[must_use]
    pub fn get(&self, national_id: &str) -> Option<UserRecord> {
        lock(&self.records).get(national_id).cloned()
    }

    fn injected_failure(&self) -> Result<(), UserPersistenceError> {
        lock(&self.failure).clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError> {
        self.injected_failure()?;
        let key = record.profile().national_id().as_ref().to_owned();
        let mut records = lock(&self.records);
        if records.contains_key(&key) {
            return Err(UserPersistenceError::duplicate(key));
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        self.injected_failure()?;
        Ok(lock(&self.records).get(national_id.as_ref()).cloned())
    }
}

/// Append-only login event log.
#[derive(Debug, Default)]
pub struct InMemoryLoginEventRepository {
    events: Mutex<Vec<LoginEvent>>,
    failure: Mutex<Option<LoginEventPersistenceError>>,
}

impl InMemoryLoginEventRepository {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail with `error`.
    pub fn fail_with(&self, error: LoginEventPersistenceError) {
        *lock(&self.failure) = Some(error);
    }

    /// Snapshot of the appended events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<LoginEvent> {
        lock(&self.events).clone()
    }

    /// Number of events recorded for `national_id`.
    #[must_use]
    pub fn count_for(&self, national_id: &str) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| event.national_id().as_ref() == national_id)
            .count()
    }
}

#[async_trait]
impl LoginEventRepository for InMemoryLoginEventRepository {
    async fn append(&self, event: &LoginEvent) -> Result<(), LoginEventPersistenceError> {
        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }
        lock(&self.events).push(event.clone());
        Ok(())
    }
}
