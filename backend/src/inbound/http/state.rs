//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserLookupQuery, UserRegistration};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case.
    pub registration: Arc<dyn UserRegistration>,
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Profile lookup use-case.
    pub lookup: Arc<dyn UserLookupQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    #[must_use]
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        login: Arc<dyn LoginService>,
        lookup: Arc<dyn UserLookupQuery>,
    ) -> Self {
        Self {
            registration,
            login,
            lookup,
        }
    }

    /// Construct state from one service implementing every use-case.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use qrtixpro::domain::UserRegistryService;
    /// use qrtixpro::inbound::http::state::HttpState;
    /// use qrtixpro::outbound::persistence::{MongoLoginEventRepository, MongoUserRepository};
    ///
    /// # async fn build(db: mongodb::Database) {
    /// let service = UserRegistryService::new(
    ///     Arc::new(MongoUserRepository::new(&db)),
    ///     Arc::new(MongoLoginEventRepository::new(&db)),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(service));
    /// # let _ = state;
    /// # }
    /// ```
    #[must_use]
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UserRegistration + LoginService + UserLookupQuery + 'static,
    {
        Self {
            registration: service.clone(),
            login: service.clone(),
            lookup: service,
        }
    }
}
