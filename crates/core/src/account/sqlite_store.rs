//! SQLite-backed user and session store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Session, SessionStore, User, UserStore};
use crate::db::{self, StoreError};

/// SQLite-backed account store (users and sessions share one connection).
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Create a new SQLite account store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = db::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite account store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = db::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token_digest TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at);
            "#,
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("account store lock poisoned".to_string()))
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let created_at: String = row.get(3)?;
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: db::parse_timestamp(&created_at),
        })
    }

    fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<Session> {
        let created_at: String = row.get(2)?;
        let expires_at: String = row.get(3)?;
        Ok(Session {
            token_digest: row.get(0)?,
            email: row.get(1)?,
            created_at: db::parse_timestamp(&created_at),
            expires_at: db::parse_timestamp(&expires_at),
        })
    }
}

impl UserStore for SqliteAccountStore {
    fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?)",
            params![email, password_hash, now.to_rfc3339()],
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let conn = self.conn()?;

        let user = conn
            .query_row(
                "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
                params![email],
                Self::row_to_user,
            )
            .optional()?;

        Ok(user)
    }
}

impl SessionStore for SqliteAccountStore {
    fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO sessions (token_digest, email, created_at, expires_at) VALUES (?, ?, ?, ?)",
            params![
                session.token_digest,
                session.email,
                session.created_at.to_rfc3339(),
                session.expires_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn find_session(&self, token_digest: &str) -> Result<Option<Session>, StoreError> {
        let conn = self.conn()?;

        let session = conn
            .query_row(
                "SELECT token_digest, email, created_at, expires_at FROM sessions WHERE token_digest = ?",
                params![token_digest],
                Self::row_to_session,
            )
            .optional()?;

        Ok(session)
    }

    fn delete_session(&self, token_digest: &str) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM sessions WHERE token_digest = ?",
            params![token_digest],
        )?;
        Ok(removed)
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let conn = self.conn()?;

        // Timestamps are stored as RFC 3339 in UTC, so text comparison orders them.
        let removed = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?",
            params![now.to_rfc3339()],
        )?;
        Ok(removed)
    }
}
