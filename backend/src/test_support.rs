//! Test utilities for the backend crate.
//!
//! This module provides shared doubles for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

mod memory_store;

pub use memory_store::{FixedClock, InMemoryLoginEventRepository, InMemoryUserRepository};
