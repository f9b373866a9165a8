//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `LoginEventRepository`) are implemented by
//! outbound adapters; driving ports (`UserRegistration`, `LoginService`,
//! `UserLookupQuery`) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_event_repository;
mod login_service;
mod user_lookup_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use login_event_repository::MockLoginEventRepository;
pub use login_event_repository::{LoginEventPersistenceError, LoginEventRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use user_lookup_query::MockUserLookupQuery;
pub use user_lookup_query::UserLookupQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
