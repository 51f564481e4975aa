//! Account registration.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use reelmark_core::signup::SignUpRequest;
use reelmark_core::UserSummary;
use std::sync::Arc;

use super::error::ApiError;
use crate::state::AppState;

/// Register a new account
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    let Json(body) = body?;
    let user = state.accounts().register(&body.email, &body.password)?;
    Ok((StatusCode::CREATED, Json(UserSummary::from(&user))))
}
