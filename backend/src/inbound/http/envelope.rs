//! Response envelope shared by every endpoint.
//!
//! ```text
//! {"status":"success","mensaje":"Usuario encontrado","data":{...}}
//! {"status":"error","mensaje":"Credenciales inválidas"}
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserProfile;

/// Outcome flag carried in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The operation completed.
    Success,
    /// The operation failed; `mensaje` says why.
    Error,
}

/// Public user profile as returned by login and lookup.
///
/// The password hash is never part of this payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponse {
    /// Given names.
    pub nombres: String,
    /// Surnames.
    pub apellidos: String,
    /// National ID.
    pub cedula: String,
    /// Contact email.
    pub correo: String,
    /// Contact phone.
    pub telefono: String,
    /// Photo reference or inline data.
    pub foto: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let fields = profile.into_fields();
        Self {
            nombres: fields.given_names,
            apellidos: fields.surnames,
            cedula: fields.national_id,
            correo: fields.email,
            telefono: fields.phone,
            foto: fields.photo,
        }
    }
}

/// JSON body of every response.
///
/// ## Invariants
/// - `data` is only present on successful operations that return a profile.
///
/// # Examples
/// ```
/// use qrtixpro::inbound::http::envelope::ApiEnvelope;
///
/// let body = serde_json::to_value(ApiEnvelope::error("Ruta no encontrada")).unwrap();
/// assert_eq!(body, serde_json::json!({"status": "error", "mensaje": "Ruta no encontrada"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope {
    /// Whether the operation succeeded.
    pub status: EnvelopeStatus,
    /// Human-readable outcome message.
    pub mensaje: String,
    /// Profile returned by login and lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<UserProfileResponse>,
}

impl ApiEnvelope {
    /// Success envelope without data.
    #[must_use]
    pub fn success(mensaje: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            mensaje: mensaje.into(),
            data: None,
        }
    }

    /// Success envelope carrying a user profile.
    #[must_use]
    pub fn success_with(mensaje: impl Into<String>, data: UserProfileResponse) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            mensaje: mensaje.into(),
            data: Some(data),
        }
    }

    /// Error envelope.
    #[must_use]
    pub fn error(mensaje: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            mensaje: mensaje.into(),
            data: None,
        }
    }
}
