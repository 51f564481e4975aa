//! Login and logout.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use reelmark_core::auth::{extract_token, SESSION_COOKIE};
use serde::Deserialize;
use std::sync::Arc;

use super::bookmarks::SuccessResponse;
use super::error::ApiError;
use super::middleware::auth_request;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

fn session_cookie(value: &str, max_age_secs: i64) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, value, max_age_secs
    ))
    .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Exchange credentials for a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let issued = state.accounts().login(&body.email, &body.password)?;

    let max_age = (issued.expires_at - chrono::Utc::now()).num_seconds().max(0);
    let cookie = session_cookie(&issued.token, max_age)?;

    Ok(([(header::SET_COOKIE, cookie)], Json(issued)).into_response())
}

/// End the caller's session, if any
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let request = auth_request(&headers, None);
    if let Some(token) = extract_token(&request) {
        state.accounts().logout(token)?;
    }

    let cookie = session_cookie("", 0)?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}
