//! Per-user bookmark operations.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{BookmarkRecord, BookmarkScope, BookmarkStore, DeleteOutcome};
use crate::account::{normalize_email, User, UserStore};
use crate::auth::Identity;
use crate::catalog::VideoId;
use crate::db::StoreError;
use crate::metrics::{BOOKMARK_OPERATIONS, ORPHANED_IDENTITIES};

#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The identity is authenticated but no user row matches its email.
    #[error("User not found")]
    UserNotFound(String),

    #[error("Already bookmarked")]
    Conflict(VideoId),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookmarkError {
    fn outcome(&self) -> &'static str {
        match self {
            BookmarkError::UserNotFound(_) => "user_not_found",
            BookmarkError::Conflict(_) => "conflict",
            BookmarkError::Internal(_) => "error",
        }
    }
}

impl From<StoreError> for BookmarkError {
    fn from(e: StoreError) -> Self {
        BookmarkError::Internal(e.to_string())
    }
}

/// Bookmark service scoped to the authenticated identity on each call.
pub struct BookmarkService {
    users: Arc<dyn UserStore>,
    bookmarks: Arc<dyn BookmarkStore>,
    selected_limit: u32,
}

impl BookmarkService {
    pub fn new(
        users: Arc<dyn UserStore>,
        bookmarks: Arc<dyn BookmarkStore>,
        selected_limit: u32,
    ) -> Self {
        Self {
            users,
            bookmarks,
            selected_limit,
        }
    }

    fn resolve_user(&self, identity: &Identity) -> Result<User, BookmarkError> {
        let email = normalize_email(&identity.email);
        match self.users.find_user_by_email(&email)? {
            Some(user) => Ok(user),
            None => {
                warn!(method = %identity.method, "Authenticated identity has no user row");
                ORPHANED_IDENTITIES.inc();
                Err(BookmarkError::UserNotFound(email))
            }
        }
    }

    fn record<T>(operation: &str, result: &Result<T, BookmarkError>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        BOOKMARK_OPERATIONS
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// List the caller's bookmarks in creation order.
    pub fn list(
        &self,
        identity: &Identity,
        scope: BookmarkScope,
    ) -> Result<Vec<BookmarkRecord>, BookmarkError> {
        let result = self.list_inner(identity, scope);
        Self::record("list", &result);
        result
    }

    fn list_inner(
        &self,
        identity: &Identity,
        scope: BookmarkScope,
    ) -> Result<Vec<BookmarkRecord>, BookmarkError> {
        let user = self.resolve_user(identity)?;
        let limit = match scope {
            BookmarkScope::All => None,
            BookmarkScope::Selected => Some(self.selected_limit),
        };

        let records: Vec<BookmarkRecord> = self
            .bookmarks
            .list(user.id, limit)?
            .into_iter()
            .map(BookmarkRecord::from)
            .collect();

        debug!(
            user_id = user.id,
            scope = scope.as_str(),
            count = records.len(),
            "Listed bookmarks"
        );
        Ok(records)
    }

    /// Bookmark a video for the caller. A second create for the same video is a conflict.
    pub fn create(
        &self,
        identity: &Identity,
        video_id: &VideoId,
    ) -> Result<BookmarkRecord, BookmarkError> {
        let result = self.create_inner(identity, video_id);
        Self::record("create", &result);
        result
    }

    fn create_inner(
        &self,
        identity: &Identity,
        video_id: &VideoId,
    ) -> Result<BookmarkRecord, BookmarkError> {
        let user = self.resolve_user(identity)?;

        if self.bookmarks.find(user.id, video_id)?.is_some() {
            return Err(BookmarkError::Conflict(video_id.clone()));
        }

        // The unique index settles races between the check above and the insert.
        let bookmark = match self.bookmarks.insert(user.id, video_id) {
            Ok(bookmark) => bookmark,
            Err(StoreError::UniqueViolation(_)) => {
                return Err(BookmarkError::Conflict(video_id.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = user.id, video_id = %video_id, "Created bookmark");
        Ok(bookmark.into())
    }

    /// Remove the caller's bookmark for a video. Deleting an absent bookmark succeeds.
    pub fn delete(
        &self,
        identity: &Identity,
        video_id: &VideoId,
    ) -> Result<DeleteOutcome, BookmarkError> {
        let result = self.delete_inner(identity, video_id);
        Self::record("delete", &result);
        result
    }

    fn delete_inner(
        &self,
        identity: &Identity,
        video_id: &VideoId,
    ) -> Result<DeleteOutcome, BookmarkError> {
        let user = self.resolve_user(identity)?;
        let removed = self.bookmarks.delete(user.id, video_id)?;
        info!(user_id = user.id, video_id = %video_id, removed, "Deleted bookmark");
        Ok(DeleteOutcome { removed })
    }
}
