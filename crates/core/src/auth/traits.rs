use async_trait::async_trait;
use thiserror::Error;

use super::types::{AuthRequest, Identity};

#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials on the request.
    #[error("Authentication required")]
    NotAuthenticated,

    /// Credentials present but unknown or malformed.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Session expired")]
    SessionExpired,

    /// The backing store could not be consulted.
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AuthError {
    /// Label used for the auth-failure metric.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "not_authenticated",
            AuthError::InvalidCredentials(_) => "invalid_credentials",
            AuthError::SessionExpired => "session_expired",
            AuthError::ServiceUnavailable(_) | AuthError::ConfigurationError(_) => "internal_error",
        }
    }
}

/// Resolves the caller of a request to an email-keyed identity.
///
/// Implementations consult their backing source on every call; there is no
/// in-memory session cache.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError>;

    /// Name of this authentication method
    fn method_name(&self) -> &'static str;
}
