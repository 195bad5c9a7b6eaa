use thiserror::Error;

pub const MSG_REGISTER_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    /// Unknown email and wrong password share this variant so callers cannot tell them apart.
    #[error("Invalid email or password")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Unauthorized => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::HashError(_) | AuthError::Repository(_))
    }
}
