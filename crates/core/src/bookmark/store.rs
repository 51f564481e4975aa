//! Bookmark storage trait.

use crate::catalog::VideoId;
use crate::db::StoreError;

use super::Bookmark;

/// Trait for bookmark storage backends.
///
/// Implementations must enforce uniqueness of `(user_id, video_id)` and
/// report a violation as [`StoreError::UniqueViolation`].
pub trait BookmarkStore: Send + Sync {
    /// Find the bookmark for a `(user, video)` pair.
    fn find(&self, user_id: i64, video_id: &VideoId) -> Result<Option<Bookmark>, StoreError>;

    /// List a user's bookmarks in ascending id order, optionally capped.
    fn list(&self, user_id: i64, limit: Option<u32>) -> Result<Vec<Bookmark>, StoreError>;

    /// Insert a new bookmark.
    fn insert(&self, user_id: i64, video_id: &VideoId) -> Result<Bookmark, StoreError>;

    /// Delete every bookmark matching `(user, video)`. Returns rows removed.
    fn delete(&self, user_id: i64, video_id: &VideoId) -> Result<usize, StoreError>;
}
