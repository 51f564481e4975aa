//! Keeps the merged video list in line with the server's bookmarks.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, Notify};
use tracing::{debug, info, warn};

use super::store::merge_bookmarks;
use super::{BookmarkSource, ChangeOrigin, SyncError, SyncStatus, VideoStore};
use crate::bookmark::BookmarkScope;
use crate::catalog::VideoId;
use crate::metrics::SYNC_RUNS;

/// A bookmark toggle the server did not accept.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Video {0} is not in the catalog")]
    UnknownVideo(VideoId),

    #[error("Failed to update bookmark for video {video_id}: {source}")]
    Request {
        video_id: VideoId,
        #[source]
        source: SyncError,
    },
}

/// Reconciles the [`VideoStore`] with a [`BookmarkSource`].
pub struct BookmarkSyncController {
    store: Arc<VideoStore>,
    source: Arc<dyn BookmarkSource>,
    reconcile: Notify,
    /// Latched stop flag; `true` once [`stop`](Self::stop) has been called.
    shutdown_tx: watch::Sender<bool>,
}

impl BookmarkSyncController {
    pub fn new(store: Arc<VideoStore>, source: Arc<dyn BookmarkSource>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store,
            source,
            reconcile: Notify::new(),
            shutdown_tx,
        }
    }

    pub fn store(&self) -> &Arc<VideoStore> {
        &self.store
    }

    /// Fetch every bookmark and publish the merged list.
    ///
    /// Never fails: on a fetch error the static catalog flags are published
    /// with a `Failed` status.
    pub async fn sync(&self) -> SyncStatus {
        match self.source.list_bookmarks(BookmarkScope::All).await {
            Ok(records) => {
                let ids: HashSet<VideoId> = records.into_iter().map(|r| r.video_id).collect();
                let merged = merge_bookmarks(&self.store.defaults(), &ids);
                let bookmarked = merged.iter().filter(|v| v.is_bookmarked).count();

                self.store
                    .replace(merged, ChangeOrigin::Sync, SyncStatus::Synced);
                SYNC_RUNS.with_label_values(&["synced"]).inc();
                debug!(bookmarked, "Bookmark sync complete");
                SyncStatus::Synced
            }
            Err(e) => {
                warn!("Bookmark sync failed, showing catalog defaults: {}", e);
                let status = SyncStatus::Failed(e.to_string());
                self.store
                    .replace(self.store.defaults(), ChangeOrigin::Sync, status.clone());
                SYNC_RUNS.with_label_values(&["failed_open"]).inc();
                status
            }
        }
    }

    /// Sync once, then re-sync whenever another writer replaces the list or
    /// a bookmark toggle finishes. Returns after [`stop`](Self::stop), and
    /// returns at once if `stop` was called before.
    pub async fn run(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        if *shutdown_rx.borrow_and_update() {
            debug!("Bookmark sync controller already stopped");
            return;
        }
        let mut changes = self.store.subscribe();
        let mut seen_foreign = changes.borrow_and_update().foreign_revision;

        info!("Bookmark sync controller started");
        self.sync().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Bookmark sync controller received shutdown signal");
                    break;
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let foreign = changes.borrow_and_update().foreign_revision;
                    if foreign > seen_foreign {
                        seen_foreign = foreign;
                        debug!(revision = foreign, "Video list replaced, re-syncing bookmarks");
                        self.sync().await;
                    }
                }
                _ = self.reconcile.notified() => {
                    debug!("Bookmark toggled, re-syncing bookmarks");
                    self.sync().await;
                }
            }
        }

        info!("Bookmark sync controller stopped");
    }

    /// Make [`run`](Self::run) exit, whether it is running yet or not.
    pub fn stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Bookmark or unbookmark a video.
    ///
    /// The flag is flipped optimistically. Once the server has answered, a
    /// running controller reconciles with it whatever the outcome. A create
    /// that conflicts and a delete of an absent bookmark both count as success.
    pub async fn set_bookmarked(
        &self,
        video_id: &VideoId,
        bookmarked: bool,
    ) -> Result<(), MutationError> {
        if !self.store.set_flag(video_id, bookmarked, ChangeOrigin::Local) {
            return Err(MutationError::UnknownVideo(video_id.clone()));
        }

        let result = if bookmarked {
            match self.source.create_bookmark(video_id).await {
                Ok(_) | Err(SyncError::Conflict(_)) => Ok(()),
                Err(e) => Err(e),
            }
        } else {
            self.source.delete_bookmark(video_id).await
        };
        self.reconcile.notify_one();

        result.map_err(|source| {
            warn!(video_id = %video_id, bookmarked, "Bookmark update failed: {}", source);
            MutationError::Request {
                video_id: video_id.clone(),
                source,
            }
        })
    }
}
