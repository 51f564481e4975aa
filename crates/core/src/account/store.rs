//! Account storage traits.

use chrono::{DateTime, Utc};

use super::{Session, User};
use crate::db::StoreError;

/// Trait for user storage backends.
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken email is reported as [`StoreError::UniqueViolation`].
    fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Look a user up by normalized email.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Trait for session storage backends.
pub trait SessionStore: Send + Sync {
    fn create_session(&self, session: &Session) -> Result<(), StoreError>;

    fn find_session(&self, token_digest: &str) -> Result<Option<Session>, StoreError>;

    /// Remove a session. Returns rows removed.
    fn delete_session(&self, token_digest: &str) -> Result<usize, StoreError>;

    /// Remove every session that expired at or before `now`.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}
