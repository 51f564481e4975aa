//! Where the sync controller reads and writes bookmarks.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::Identity;
use crate::bookmark::{BookmarkError, BookmarkRecord, BookmarkScope, BookmarkService};
use crate::catalog::VideoId;

#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("Already bookmarked: {0}")]
    Conflict(VideoId),

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Bookmark operations as seen by a single signed-in client.
#[async_trait]
pub trait BookmarkSource: Send + Sync {
    async fn list_bookmarks(&self, scope: BookmarkScope) -> Result<Vec<BookmarkRecord>, SyncError>;

    async fn create_bookmark(&self, video_id: &VideoId) -> Result<BookmarkRecord, SyncError>;

    /// Deleting an absent bookmark succeeds.
    async fn delete_bookmark(&self, video_id: &VideoId) -> Result<(), SyncError>;
}

/// Source that calls a [`BookmarkService`] directly on behalf of one identity.
pub struct InProcessBookmarkSource {
    service: Arc<BookmarkService>,
    identity: Identity,
}

impl InProcessBookmarkSource {
    pub fn new(service: Arc<BookmarkService>, identity: Identity) -> Self {
        Self { service, identity }
    }
}

impl From<BookmarkError> for SyncError {
    fn from(e: BookmarkError) -> Self {
        match e {
            BookmarkError::UserNotFound(_) => SyncError::UserNotFound,
            BookmarkError::Conflict(id) => SyncError::Conflict(id),
            BookmarkError::Internal(message) => SyncError::Server {
                status: 500,
                message,
            },
        }
    }
}

#[async_trait]
impl BookmarkSource for InProcessBookmarkSource {
    async fn list_bookmarks(&self, scope: BookmarkScope) -> Result<Vec<BookmarkRecord>, SyncError> {
        Ok(self.service.list(&self.identity, scope)?)
    }

    async fn create_bookmark(&self, video_id: &VideoId) -> Result<BookmarkRecord, SyncError> {
        Ok(self.service.create(&self.identity, video_id)?)
    }

    async fn delete_bookmark(&self, video_id: &VideoId) -> Result<(), SyncError> {
        self.service.delete(&self.identity, video_id)?;
        Ok(())
    }
}
