//! Catalog API handlers.

use axum::{extract::State, Json};
use reelmark_core::Video;
use std::sync::Arc;

use crate::state::AppState;

/// The static video catalog with its default bookmark flags
pub async fn list_catalog(State(state): State<Arc<AppState>>) -> Json<Vec<Video>> {
    Json(state.catalog().videos().to_vec())
}
