//! Registration, login and logout.

use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::password::{hash_password, verify_password};
use super::{normalize_email, token_digest, IssuedSession, Session, SessionStore, User, UserStore};
use crate::db::StoreError;
use crate::metrics::ACCOUNT_OPERATIONS;
use crate::signup::{validate_email, validate_password, Field, FieldError};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{field:?}: {error}")]
    Validation { field: Field, error: FieldError },

    #[error("This account already exists")]
    AlreadyExists,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        AccountError::Internal(e.to_string())
    }
}

/// Account operations over the user and session stores.
pub struct AccountService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        session_ttl_hours: u32,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl: Duration::hours(i64::from(session_ttl_hours)),
        }
    }

    /// Create an account after applying the sign-up field rules.
    pub fn register(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let email = normalize_email(email);
        validate_email(&email).map_err(|error| AccountError::Validation {
            field: Field::Email,
            error,
        })?;
        validate_password(password).map_err(|error| AccountError::Validation {
            field: Field::Password,
            error,
        })?;

        let password_hash =
            hash_password(password).map_err(|e| AccountError::Internal(e.to_string()))?;

        match self.users.create_user(&email, &password_hash) {
            Ok(user) => {
                info!(user_id = user.id, "Registered new account");
                ACCOUNT_OPERATIONS
                    .with_label_values(&["register", "ok"])
                    .inc();
                Ok(user)
            }
            Err(StoreError::UniqueViolation(_)) => {
                ACCOUNT_OPERATIONS
                    .with_label_values(&["register", "conflict"])
                    .inc();
                Err(AccountError::AlreadyExists)
            }
            Err(e) => {
                ACCOUNT_OPERATIONS
                    .with_label_values(&["register", "error"])
                    .inc();
                Err(e.into())
            }
        }
    }

    /// Verify credentials and issue a new session token.
    pub fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AccountError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_user_by_email(&email)? else {
            debug!("Login attempt for unknown account");
            ACCOUNT_OPERATIONS
                .with_label_values(&["login", "rejected"])
                .inc();
            return Err(AccountError::InvalidCredentials);
        };

        let verified = verify_password(password, &user.password_hash)
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        if !verified {
            ACCOUNT_OPERATIONS
                .with_label_values(&["login", "rejected"])
                .inc();
            return Err(AccountError::InvalidCredentials);
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let session = Session {
            token_digest: token_digest(&token),
            email: user.email.clone(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.sessions.create_session(&session)?;

        match self.sessions.purge_expired(now) {
            Ok(0) => {}
            Ok(n) => debug!("Purged {} expired sessions", n),
            Err(e) => warn!("Failed to purge expired sessions: {}", e),
        }

        info!(user_id = user.id, "Issued session");
        ACCOUNT_OPERATIONS.with_label_values(&["login", "ok"]).inc();

        Ok(IssuedSession {
            token,
            expires_at: session.expires_at,
        })
    }

    /// Drop a session. Unknown tokens are not an error.
    pub fn logout(&self, token: &str) -> Result<(), AccountError> {
        let removed = self.sessions.delete_session(&token_digest(token))?;
        debug!("Logout removed {} session(s)", removed);
        ACCOUNT_OPERATIONS.with_label_values(&["logout", "ok"]).inc();
        Ok(())
    }
}
