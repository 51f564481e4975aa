//! User accounts and login sessions.

mod password;
mod service;
mod sqlite_store;
mod store;
mod types;

pub use password::{hash_password, verify_password};
pub use service::{AccountError, AccountService};
pub use sqlite_store::SqliteAccountStore;
pub use store::{SessionStore, UserStore};
pub use types::{IssuedSession, Session, User, UserSummary};

use sha2::{Digest, Sha256};

/// Canonical form of an email used as the user key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hex SHA-256 of a session token; the only form in which tokens are stored.
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
