//! Mock bookmark source for testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::bookmark::{BookmarkRecord, BookmarkScope};
use crate::catalog::VideoId;
use crate::sync::{BookmarkSource, SyncError};

/// A recorded call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    List(BookmarkScope),
    Create(VideoId),
    Delete(VideoId),
}

/// In-memory implementation of [`BookmarkSource`] with server semantics:
/// creates conflict on duplicates, deletes are idempotent.
#[derive(Debug, Default)]
pub struct MockBookmarkSource {
    bookmarks: Arc<RwLock<Vec<BookmarkRecord>>>,
    next_id: Arc<RwLock<i64>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<SyncError>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl MockBookmarkSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored bookmarks.
    pub async fn set_bookmarks(&self, bookmarks: Vec<BookmarkRecord>) {
        let max_id = bookmarks.iter().map(|b| b.id).max().unwrap_or(0);
        *self.next_id.write().await = max_id;
        *self.bookmarks.write().await = bookmarks;
    }

    /// Add a bookmark directly, bypassing call recording.
    pub async fn add_bookmark(&self, video_id: &str) {
        self.insert(VideoId::from(video_id)).await;
    }

    pub async fn has_bookmark(&self, video_id: &str) -> bool {
        let id = VideoId::from(video_id);
        self.bookmarks.read().await.iter().any(|b| b.video_id == id)
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: SyncError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of list calls made so far.
    pub async fn list_calls(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::List(_)))
            .count()
    }

    async fn insert(&self, video_id: VideoId) -> BookmarkRecord {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let record = BookmarkRecord {
            id: *next_id,
            video_id,
        };
        self.bookmarks.write().await.push(record.clone());
        record
    }

    async fn record(&self, call: RecordedCall) -> Result<(), SyncError> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookmarkSource for MockBookmarkSource {
    async fn list_bookmarks(&self, scope: BookmarkScope) -> Result<Vec<BookmarkRecord>, SyncError> {
        self.record(RecordedCall::List(scope)).await?;
        Ok(self.bookmarks.read().await.clone())
    }

    async fn create_bookmark(&self, video_id: &VideoId) -> Result<BookmarkRecord, SyncError> {
        self.record(RecordedCall::Create(video_id.clone())).await?;
        if self
            .bookmarks
            .read()
            .await
            .iter()
            .any(|b| &b.video_id == video_id)
        {
            return Err(SyncError::Conflict(video_id.clone()));
        }
        Ok(self.insert(video_id.clone()).await)
    }

    async fn delete_bookmark(&self, video_id: &VideoId) -> Result<(), SyncError> {
        self.record(RecordedCall::Delete(video_id.clone())).await?;
        self.bookmarks
            .write()
            .await
            .retain(|b| &b.video_id != video_id);
        Ok(())
    }
}
