//! HTTP bookmark client for the REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BookmarkSource, SyncError};
use crate::bookmark::{BookmarkRecord, BookmarkScope};
use crate::catalog::VideoId;
use crate::config::ClientConfig;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoIdBody<'a> {
    video_id: &'a VideoId,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`BookmarkSource`] backed by the `/bookmarks` endpoints.
///
/// Every request carries the configured deadline.
pub struct HttpBookmarkClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBookmarkClient {
    pub fn new(config: &ClientConfig, token: Option<String>) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| SyncError::ConnectionFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn bookmarks_url(&self) -> String {
        format!("{}/bookmarks", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SyncError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                SyncError::Timeout
            } else {
                SyncError::ConnectionFailed(e.to_string())
            }
        })
    }

    async fn check(response: Response, video_id: Option<&VideoId>) -> Result<Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body, video_id))
    }
}

/// Map a non-success response to the error taxonomy.
fn status_error(status: StatusCode, body: &str, video_id: Option<&VideoId>) -> SyncError {
    match (status, video_id) {
        (StatusCode::UNAUTHORIZED, _) => SyncError::Unauthorized,
        (StatusCode::NOT_FOUND, _) => SyncError::UserNotFound,
        (StatusCode::CONFLICT, Some(id)) => SyncError::Conflict(id.clone()),
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            SyncError::Server {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl BookmarkSource for HttpBookmarkClient {
    async fn list_bookmarks(&self, scope: BookmarkScope) -> Result<Vec<BookmarkRecord>, SyncError> {
        let request = self
            .client
            .get(self.bookmarks_url())
            .query(&[("type", scope.as_str())]);
        let response = Self::check(self.send(request).await?, None).await?;

        let records: Vec<BookmarkRecord> = response
            .json()
            .await
            .map_err(|e| SyncError::InvalidResponse(e.to_string()))?;
        debug!(count = records.len(), "Fetched bookmarks");
        Ok(records)
    }

    async fn create_bookmark(&self, video_id: &VideoId) -> Result<BookmarkRecord, SyncError> {
        let request = self
            .client
            .post(self.bookmarks_url())
            .json(&VideoIdBody { video_id });
        let response = Self::check(self.send(request).await?, Some(video_id)).await?;

        response
            .json()
            .await
            .map_err(|e| SyncError::InvalidResponse(e.to_string()))
    }

    async fn delete_bookmark(&self, video_id: &VideoId) -> Result<(), SyncError> {
        let request = self
            .client
            .delete(self.bookmarks_url())
            .json(&VideoIdBody { video_id });
        Self::check(self.send(request).await?, Some(video_id)).await?;
        Ok(())
    }
}
