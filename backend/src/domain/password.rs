//! Argon2id password hashing.
//!
//! Passwords are hashed with a fresh random salt and stored as PHC strings,
//! so the algorithm parameters travel with each hash.

use std::fmt;
use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// Hashing failed inside the Argon2 implementation.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Underlying library error text.
        message: String,
    },
    /// A stored value is not a valid PHC hash string.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash {
        /// Underlying library error text.
        message: String,
    },
    /// Verification failed for a reason other than a mismatch.
    #[error("password verification failed: {message}")]
    Verify {
        /// Underlying library error text.
        message: String,
    },
}

/// Hash checked when no stored hash exists, so rejecting an unknown user
/// costs one Argon2id verification just like a wrong password.
static FALLBACK_HASH: LazyLock<Result<PasswordHash, PasswordError>> =
    LazyLock::new(|| PasswordHash::hash("qrtixpro-fallback-credential"));

/// Argon2id hash of a password in PHC string form.
///
/// # Examples
/// ```
/// use qrtixpro::domain::PasswordHash;
///
/// let hash = PasswordHash::hash("secret").expect("hashing works");
/// assert!(hash.verify("secret").expect("well-formed hash"));
/// assert!(!hash.verify("wrong").expect("well-formed hash"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(phc.to_string()))
    }

    /// Wrap a stored PHC string, rejecting values that do not parse.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let encoded = phc.into();
        argon2::PasswordHash::new(&encoded).map_err(|err| PasswordError::MalformedHash {
            message: err.to_string(),
        })?;
        Ok(Self(encoded))
    }

    /// Check `password` against this hash.
    ///
    /// Returns `Ok(false)` on mismatch and an error only when verification
    /// itself cannot run.
    pub fn verify(&self, password: &str) -> Result<bool, PasswordError> {
        let parsed =
            argon2::PasswordHash::new(&self.0).map_err(|err| PasswordError::MalformedHash {
                message: err.to_string(),
            })?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordError::Verify {
                message: err.to_string(),
            }),
        }
    }

    /// Verify `password` against a fixed hash and discard the outcome.
    ///
    /// Used when there is no stored hash to check, so the caller spends the
    /// same work as a real verification before rejecting.
    ///
    /// # Examples
    /// ```
    /// use qrtixpro::domain::PasswordHash;
    ///
    /// PasswordHash::verify_fallback("secret").expect("fallback hash verifies");
    /// ```
    pub fn verify_fallback(password: &str) -> Result<(), PasswordError> {
        FALLBACK_HASH
            .as_ref()
            .map_err(Clone::clone)?
            .verify(password)
            .map(|_| ())
    }

    /// PHC string suitable for persistence.
    #[must_use]
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
