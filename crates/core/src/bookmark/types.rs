use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::VideoId;

/// A persisted user-to-video marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Store-assigned id.
    pub id: i64,
    pub user_id: i64,
    pub video_id: VideoId,
    pub created_at: DateTime<Utc>,
}

/// Wire form of a bookmark: `{ "id": .., "videoId": .. }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: i64,
    pub video_id: VideoId,
}

impl From<Bookmark> for BookmarkRecord {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id,
            video_id: bookmark.video_id,
        }
    }
}

/// Which bookmarks a list call returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkScope {
    /// Every bookmark of the user.
    #[default]
    All,
    /// A capped subset (see `bookmarks.selected_limit`).
    Selected,
}

impl BookmarkScope {
    /// Parse the `type` query parameter. Anything other than `selected`
    /// (including absence) means `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("selected") => BookmarkScope::Selected,
            _ => BookmarkScope::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkScope::All => "all",
            BookmarkScope::Selected => "selected",
        }
    }
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Rows removed; zero on a repeat delete.
    pub removed: usize,
}
