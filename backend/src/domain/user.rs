//! User data model.
//!
//! A user is identified by their national ID (`cedula`). The profile carries
//! every stored field except the password, which only exists as a hash in
//! [`UserRecord`] and as a zeroized plaintext in [`NewUser`].

use std::fmt;

use zeroize::Zeroizing;

use super::PasswordHash;

/// Maximum allowed length for a national ID.
pub const NATIONAL_ID_MAX: usize = 32;

/// Validation errors returned while building user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// National ID was missing or blank once trimmed.
    EmptyNationalId,
    /// National ID exceeded [`NATIONAL_ID_MAX`] characters.
    NationalIdTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// National ID contained characters other than ASCII letters, digits or `-`.
    NationalIdInvalidCharacters,
    /// Password was empty.
    EmptyPassword,
    /// Email was present but not shaped like `local@domain`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNationalId => write!(f, "La cédula es obligatoria"),
            Self::NationalIdTooLong { max } => {
                write!(f, "La cédula no puede superar {max} caracteres")
            }
            Self::NationalIdInvalidCharacters => write!(
                f,
                "La cédula solo puede contener letras, dígitos o guiones"
            ),
            Self::EmptyPassword => write!(f, "La contraseña es obligatoria"),
            Self::InvalidEmail => write!(f, "El correo no es válido"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// National identity number, the unique key of a user record.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`NATIONAL_ID_MAX`] characters.
/// - ASCII letters, digits and `-` only.
///
/// # Examples
/// ```
/// use qrtixpro::domain::NationalId;
///
/// let id = NationalId::new(" 0102030405 ").expect("valid cedula");
/// assert_eq!(id.as_ref(), "0102030405");
/// assert!(NationalId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Validate and construct a [`NationalId`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalized = raw.as_ref().trim();
        if normalized.is_empty() {
            return Err(UserValidationError::EmptyNationalId);
        }
        if normalized.chars().count() > NATIONAL_ID_MAX {
            return Err(UserValidationError::NationalIdTooLong {
                max: NATIONAL_ID_MAX,
            });
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(UserValidationError::NationalIdInvalidCharacters);
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

/// Raw profile fields as received from a client or read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    /// Given names (`nombres`).
    pub given_names: String,
    /// Surnames (`apellidos`).
    pub surnames: String,
    /// National ID (`cedula`), validated as a [`NationalId`].
    pub national_id: String,
    /// Contact email (`correo`).
    pub email: String,
    /// Contact phone (`telefono`).
    pub phone: String,
    /// Photo reference or inline data (`foto`).
    pub photo: String,
}

/// Public view of a user: everything but the password.
///
/// ## Invariants
/// - `national_id` satisfies the [`NationalId`] rules.
/// - `email` is empty or contains exactly one `@` with text on both sides.
/// - Free-text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    given_names: String,
    surnames: String,
    national_id: NationalId,
    email: String,
    phone: String,
    photo: String,
}

impl UserProfile {
    /// Validate raw fields into a profile.
    pub fn try_from_fields(fields: ProfileFields) -> Result<Self, UserValidationError> {
        let ProfileFields {
            given_names,
            surnames,
            national_id: raw_national_id,
            email: raw_email,
            phone,
            photo,
        } = fields;

        let national_id = NationalId::new(raw_national_id)?;
        let email = raw_email.trim().to_owned();
        if !email.is_empty() && !is_plausible_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self {
            given_names: given_names.trim().to_owned(),
            surnames: surnames.trim().to_owned(),
            national_id,
            email,
            phone: phone.trim().to_owned(),
            photo: photo.trim().to_owned(),
        })
    }

    /// Given names (`nombres`).
    #[must_use]
    pub fn given_names(&self) -> &str {
        &self.given_names
    }

    /// Surnames (`apellidos`).
    #[must_use]
    pub fn surnames(&self) -> &str {
        &self.surnames
    }

    /// Unique national ID (`cedula`).
    #[must_use]
    pub const fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    /// Contact email (`correo`), possibly empty.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone (`telefono`), possibly empty.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Photo reference (`foto`): a URL or an encoded blob.
    #[must_use]
    pub fn photo(&self) -> &str {
        &self.photo
    }

    /// Convert back into raw fields, e.g. for persistence documents.
    #[must_use]
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            given_names: self.given_names,
            surnames: self.surnames,
            national_id: self.national_id.into(),
            email: self.email,
            phone: self.phone,
            photo: self.photo,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

/// Validated registration request: a profile plus the plaintext password.
///
/// The password is zeroized on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    profile: UserProfile,
    password: Zeroizing<String>,
}

impl NewUser {
    /// Validate registration inputs.
    ///
    /// # Examples
    /// ```
    /// use qrtixpro::domain::{NewUser, ProfileFields, UserValidationError};
    ///
    /// let fields = ProfileFields {
    ///     national_id: "001".to_owned(),
    ///     given_names: "Ana".to_owned(),
    ///     ..ProfileFields::default()
    /// };
    /// let user = NewUser::try_new(fields.clone(), "secret").expect("valid user");
    /// assert_eq!(user.profile().national_id().as_ref(), "001");
    ///
    /// let err = NewUser::try_new(fields, "").expect_err("blank password");
    /// assert_eq!(err, UserValidationError::EmptyPassword);
    /// ```
    pub fn try_new(fields: ProfileFields, password: &str) -> Result<Self, UserValidationError> {
        let profile = UserProfile::try_from_fields(fields)?;
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            profile,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Profile to be stored.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Plaintext password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Split into the profile and the zeroizing password.
    #[must_use]
    pub fn into_parts(self) -> (UserProfile, Zeroizing<String>) {
        (self.profile, self.password)
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("profile", &self.profile)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A stored user: profile plus the password hash.
///
/// Records written before passwords were hashed carry no hash; they can be
/// looked up but never authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    profile: UserProfile,
    password_hash: Option<PasswordHash>,
}

impl UserRecord {
    /// Assemble a record from validated parts.
    #[must_use]
    pub const fn new(profile: UserProfile, password_hash: PasswordHash) -> Self {
        Self {
            profile,
            password_hash: Some(password_hash),
        }
    }

    /// Assemble a record that has no usable password hash.
    #[must_use]
    pub const fn without_password(profile: UserProfile) -> Self {
        Self {
            profile,
            password_hash: None,
        }
    }

    /// Public profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Stored password hash, if the record has one.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Drop the hash and keep the public profile.
    #[must_use]
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}
