//! Bookmark API handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use reelmark_core::{BookmarkRecord, BookmarkScope, VideoId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use super::middleware::AuthUser;
use crate::state::AppState;

/// Query parameters for listing bookmarks
#[derive(Debug, Deserialize)]
pub struct ListBookmarksParams {
    /// `all` or `selected`; anything else means `all`
    #[serde(rename = "type")]
    pub scope: Option<String>,
}

/// Request body for creating or deleting a bookmark
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdBody {
    pub video_id: VideoId,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// List the caller's bookmarks
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Query(params): Query<ListBookmarksParams>,
) -> Result<Json<Vec<BookmarkRecord>>, ApiError> {
    let scope = BookmarkScope::from_query(params.scope.as_deref());
    let records = state.bookmarks().list(&identity, scope)?;
    Ok(Json(records))
}

/// Bookmark a video
pub async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<Json<VideoIdBody>, JsonRejection>,
) -> Result<Json<BookmarkRecord>, ApiError> {
    let Json(body) = body?;
    let record = state.bookmarks().create(&identity, &body.video_id)?;
    Ok(Json(record))
}

/// Remove a bookmark; succeeds even if it did not exist
pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    body: Result<Json<VideoIdBody>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Json(body) = body?;
    state.bookmarks().delete(&identity, &body.video_id)?;
    Ok(Json(SuccessResponse { success: true }))
}
