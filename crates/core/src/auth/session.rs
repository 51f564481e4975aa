//! Session-token authentication.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{AuthError, AuthRequest, Authenticator, Identity};
use crate::account::{token_digest, SessionStore};

/// Cookie set by `POST /auth/login`.
pub const SESSION_COOKIE: &str = "reelmark_session";

/// Authenticator that resolves login sessions from the session store.
///
/// Accepts the token in either:
/// - `Authorization: Bearer <token>` header
/// - `reelmark_session` cookie
pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionStore>,
}

impl SessionAuthenticator {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }
}

/// Session token carried by a request, if any. The header wins over the cookie.
pub fn extract_token(request: &AuthRequest) -> Option<&str> {
    if let Some(value) = request.header("authorization") {
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "));
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            return Some(token);
        }
    }

    request.cookie(SESSION_COOKIE).filter(|t| !t.is_empty())
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let token = extract_token(request).ok_or(AuthError::NotAuthenticated)?;

        let session = self
            .sessions
            .find_session(&token_digest(token))
            .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?
            .ok_or_else(|| AuthError::InvalidCredentials("Unknown session".to_string()))?;

        if session.is_expired(Utc::now()) {
            debug!("Rejected expired session");
            return Err(AuthError::SessionExpired);
        }

        Ok(Identity::new(session.email, self.method_name()))
    }

    fn method_name(&self) -> &'static str {
        "session"
    }
}
