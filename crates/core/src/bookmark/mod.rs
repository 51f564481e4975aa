//! Per-user bookmarks of catalog videos.

mod service;
mod sqlite_store;
mod store;
mod types;

pub use service::{BookmarkError, BookmarkService};
pub use sqlite_store::SqliteBookmarkStore;
pub use store::BookmarkStore;
pub use types::{Bookmark, BookmarkRecord, BookmarkScope, DeleteOutcome};
