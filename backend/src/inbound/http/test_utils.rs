//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockLoginService, MockUserLookupQuery, MockUserRegistration};
use crate::inbound::http::state::HttpState;

/// Mocked driving ports, configured by each test before building state.
#[derive(Default)]
pub struct MockPorts {
    /// Backs [`HttpState::registration`].
    pub registration: MockUserRegistration,
    /// Backs [`HttpState::login`].
    pub login: MockLoginService,
    /// Backs [`HttpState::lookup`].
    pub lookup: MockUserLookupQuery,
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    #[must_use]
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.registration),
            Arc::new(self.login),
            Arc::new(self.lookup),
        ))
    }
}
