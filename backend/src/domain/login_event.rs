//! Append-only audit records of successful logins.

use chrono::{DateTime, Utc};

use super::NationalId;

/// Action tag recorded for a login event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    /// A successful authentication.
    Login,
}

impl LoginAction {
    /// Wire tag stored in the `accion` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
        }
    }
}

/// One successful authentication of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginEvent {
    national_id: NationalId,
    action: LoginAction,
    occurred_at: DateTime<Utc>,
}

impl LoginEvent {
    /// Record a login by `national_id` at `occurred_at`.
    #[must_use]
    pub const fn login(national_id: NationalId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            national_id,
            action: LoginAction::Login,
            occurred_at,
        }
    }

    /// User that logged in.
    #[must_use]
    pub const fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    /// Event kind.
    #[must_use]
    pub const fn action(&self) -> LoginAction {
        self.action
    }

    /// When the login happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
