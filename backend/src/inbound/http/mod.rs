//! HTTP inbound adapter exposing the registry REST endpoints.

pub mod app;
pub mod cors;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use app::build_app;
