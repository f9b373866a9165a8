//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, which
//! makes it awkward to share small helpers without copy/paste. This module
//! wires the registry service over the in-memory doubles and offers a small
//! request/response snapshot helper.

pub mod registry;
