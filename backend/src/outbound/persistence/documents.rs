//! BSON document shapes for the `usuarios` and `logs` collections.
//!
//! These structs are internal to the adapter; the domain never sees them.
//!
//! User documents written before passwords were hashed hold a plaintext
//! `contrasena` and no `contrasena_hash`. They still decode: the plaintext is
//! ignored and the record carries no hash, so lookup works and login is
//! rejected.

use mongodb::bson::DateTime as BsonDateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{LoginEvent, PasswordHash, ProfileFields, UserProfile, UserRecord};

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub nombres: String,
    #[serde(default)]
    pub apellidos: String,
    pub cedula: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrasena_hash: Option<String>,
    #[serde(default)]
    pub foto: String,
}

impl From<&UserRecord> for UserDocument {
    fn from(record: &UserRecord) -> Self {
        let profile = record.profile();
        Self {
            id: None,
            nombres: profile.given_names().to_owned(),
            apellidos: profile.surnames().to_owned(),
            cedula: profile.national_id().as_ref().to_owned(),
            correo: profile.email().to_owned(),
            telefono: profile.phone().to_owned(),
            contrasena_hash: record
                .password_hash()
                .map(|hash| hash.as_phc().to_owned()),
            foto: profile.photo().to_owned(),
        }
    }
}

impl TryFrom<UserDocument> for UserRecord {
    type Error = UserPersistenceError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let UserDocument {
            id: _,
            nombres,
            apellidos,
            cedula,
            correo,
            telefono,
            contrasena_hash,
            foto,
        } = document;

        let profile = UserProfile::try_from_fields(ProfileFields {
            given_names: nombres,
            surnames: apellidos,
            national_id: cedula,
            email: correo,
            phone: telefono,
            photo: foto,
        })
        .map_err(|err| UserPersistenceError::corrupt(err.to_string()))?;

        let password_hash = contrasena_hash.and_then(|phc| {
            PasswordHash::from_phc(phc)
                .inspect_err(|err| {
                    warn!(
                        national_id = %profile.national_id(),
                        error = %err,
                        "ignoring malformed stored password hash"
                    );
                })
                .ok()
        });

        Ok(match password_hash {
            Some(hash) => Self::new(profile, hash),
            None => Self::without_password(profile),
        })
    }
}

/// Stored login event document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LoginEventDocument {
    pub cedula: String,
    pub accion: String,
    pub fecha: BsonDateTime,
}

impl From<&LoginEvent> for LoginEventDocument {
    fn from(event: &LoginEvent) -> Self {
        Self {
            cedula: event.national_id().as_ref().to_owned(),
            accion: event.action().as_str().to_owned(),
            fecha: BsonDateTime::from_millis(event.occurred_at().timestamp_millis()),
        }
    }
}
