//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{NationalId, UserValidationError};

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `national_id` satisfies the [`NationalId`] rules.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use qrtixpro::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" 001 ", "secret").unwrap();
/// assert_eq!(creds.national_id().as_ref(), "001");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    national_id: NationalId,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw national ID/password inputs.
    pub fn try_from_parts(national_id: &str, password: &str) -> Result<Self, UserValidationError> {
        let id = NationalId::new(national_id)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }

        Ok(Self {
            national_id: id,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// National ID used to look the user up.
    #[must_use]
    pub const fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("national_id", &self.national_id)
            .field("password", &"<redacted>")
            .finish()
    }
}
