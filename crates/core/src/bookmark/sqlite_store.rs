//! SQLite-backed bookmark store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{Bookmark, BookmarkStore};
use crate::catalog::VideoId;
use crate::db::{self, StoreError};

/// SQLite-backed bookmark store.
pub struct SqliteBookmarkStore {
    conn: Mutex<Connection>,
}

impl SqliteBookmarkStore {
    /// Create a new SQLite bookmark store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = db::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite bookmark store (useful for testing).
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
            -- user_id is resolved by the service; users live in the account store
            -- video_id is a catalog id by value; the catalog is not persisted
            CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                video_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, video_id)
            );

            CREATE INDEX IF NOT EXISTS idx_bookmarks_user ON bookmarks(user_id);
            "#,
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("bookmark store lock poisoned".to_string()))
    }

    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        let created_at: String = row.get(3)?;
        Ok(Bookmark {
            id: row.get(0)?,
            user_id: row.get(1)?,
            video_id: VideoId::new(row.get::<_, String>(2)?),
            created_at: db::parse_timestamp(&created_at),
        })
    }
}

impl BookmarkStore for SqliteBookmarkStore {
    fn find(&self, user_id: i64, video_id: &VideoId) -> Result<Option<Bookmark>, StoreError> {
        let conn = self.conn()?;

        let bookmark = conn
            .query_row(
                "SELECT id, user_id, video_id, created_at FROM bookmarks
                 WHERE user_id = ? AND video_id = ?",
                params![user_id, video_id.as_str()],
                Self::row_to_bookmark,
            )
            .optional()?;

        Ok(bookmark)
    }

    fn list(&self, user_id: i64, limit: Option<u32>) -> Result<Vec<Bookmark>, StoreError> {
        let conn = self.conn()?;

        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map(i64::from).unwrap_or(-1);

        let mut stmt = conn.prepare(
            "SELECT id, user_id, video_id, created_at FROM bookmarks
             WHERE user_id = ? ORDER BY id ASC LIMIT ?",
        )?;

        let rows = stmt.query_map(params![user_id, limit], Self::row_to_bookmark)?;

        let mut bookmarks = Vec::new();
        for row in rows {
            bookmarks.push(row?);
        }
        Ok(bookmarks)
    }

    fn insert(&self, user_id: i64, video_id: &VideoId) -> Result<Bookmark, StoreError> {
        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO bookmarks (user_id, video_id, created_at) VALUES (?, ?, ?)",
            params![user_id, video_id.as_str(), now.to_rfc3339()],
        )?;

        Ok(Bookmark {
            id: conn.last_insert_rowid(),
            user_id,
            video_id: video_id.clone(),
            created_at: now,
        })
    }

    fn delete(&self, user_id: i64, video_id: &VideoId) -> Result<usize, StoreError> {
        let conn = self.conn()?;

        let removed = conn.execute(
            "DELETE FROM bookmarks WHERE user_id = ? AND video_id = ?",
            params![user_id, video_id.as_str()],
        )?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteBookmarkStore {
        SqliteBookmarkStore::in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let store = create_test_store();
        let video = VideoId::from("3");

        let created = store.insert(1, &video).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.user_id, 1);

        let found = store.find(1, &video).unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.video_id, video);
    }

    #[test]
    fn test_schema_does_not_need_users_table() {
        let store = create_test_store();
        {
            let conn = store.conn().unwrap();
            let users_tables: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
                    [],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(users_tables, 0);
        }

        let created = store.insert(42, &VideoId::from("7")).unwrap();
        let listed: Vec<i64> = store.list(42, None).unwrap().iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![created.id]);
    }

    #[test]
    fn test_find_missing_returns_none() {
        let store = create_test_store();
        assert!(store.find(1, &VideoId::from("1")).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_is_unique_violation() {
        let store = create_test_store();
        let video = VideoId::from("3");
        store.insert(1, &video).unwrap();

        let result = store.insert(1, &video);
        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
    }

    #[test]
    fn test_same_video_different_users() {
        let store = create_test_store();
        let video = VideoId::from("3");
        store.insert(1, &video).unwrap();
        store.insert(2, &video).unwrap();

        assert_eq!(store.list(1, None).unwrap().len(), 1);
        assert_eq!(store.list(2, None).unwrap().len(), 1);
    }

    #[test]
    fn test_list_is_scoped_and_ordered() {
        let store = create_test_store();
        for id in ["5", "1", "9"] {
            store.insert(1, &VideoId::from(id)).unwrap();
        }
        store.insert(2, &VideoId::from("7")).unwrap();

        let ids: Vec<String> = store
            .list(1, None)
            .unwrap()
            .into_iter()
            .map(|b| b.video_id.to_string())
            .collect();
        assert_eq!(ids, vec!["5", "1", "9"]);
    }

    #[test]
    fn test_list_with_limit() {
        let store = create_test_store();
        for n in 0..8 {
            store.insert(1, &VideoId::from(n as i64)).unwrap();
        }

        assert_eq!(store.list(1, Some(5)).unwrap().len(), 5);
        assert_eq!(store.list(1, Some(20)).unwrap().len(), 8);
        assert_eq!(store.list(1, None).unwrap().len(), 8);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = create_test_store();
        let video = VideoId::from("3");
        store.insert(1, &video).unwrap();

        assert_eq!(store.delete(1, &video).unwrap(), 1);
        assert_eq!(store.delete(1, &video).unwrap(), 0);
        assert!(store.find(1, &video).unwrap().is_none());
    }

    #[test]
    fn test_delete_only_touches_owner() {
        let store = create_test_store();
        let video = VideoId::from("3");
        store.insert(1, &video).unwrap();
        store.insert(2, &video).unwrap();

        store.delete(1, &video).unwrap();
        assert!(store.find(2, &video).unwrap().is_some());
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bookmarks.db");

        {
            let store = SqliteBookmarkStore::new(&path).unwrap();
            store.insert(1, &VideoId::from("2")).unwrap();
        }

        let store = SqliteBookmarkStore::new(&path).unwrap();
        assert_eq!(store.list(1, None).unwrap().len(), 1);
    }
}
