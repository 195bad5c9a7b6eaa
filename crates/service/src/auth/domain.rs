use serde::{Deserialize, Serialize};

use super::errors::{AuthError, MSG_LOGIN_FIELDS_REQUIRED, MSG_REGISTER_FIELDS_REQUIRED};

/// Registration input. Absent fields decode as empty strings and fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(MSG_REGISTER_FIELDS_REQUIRED.into()));
        }
        Ok(())
    }
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(MSG_LOGIN_FIELDS_REQUIRED.into()));
        }
        Ok(())
    }
}

/// Stored user. `password_hash` is a PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Successful login: only the display name is handed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub name: String,
}
