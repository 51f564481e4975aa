//! Client-side state container for the merged video list.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::catalog::{Catalog, Category, Video, VideoId};

/// A catalog video annotated with the caller's bookmark state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedVideo {
    pub video: Video,
    pub is_bookmarked: bool,
}

impl MergedVideo {
    /// The video with its static catalog flag.
    pub fn from_static(video: Video) -> Self {
        let is_bookmarked = video.is_bookmarked;
        Self {
            video,
            is_bookmarked,
        }
    }

    pub fn id(&self) -> &VideoId {
        &self.video.id
    }

    pub fn title(&self) -> &str {
        &self.video.title
    }

    pub fn category(&self) -> Category {
        self.video.category
    }
}

/// Who replaced the published collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Value the store was created with.
    Initial,
    /// Written by the sync controller after a reconcile.
    Sync,
    /// Optimistic local toggle. Reconciled by the controller once the
    /// server has answered, not on publish.
    Local,
    /// Any other writer.
    External,
}

impl ChangeOrigin {
    fn is_foreign(self) -> bool {
        matches!(self, ChangeOrigin::Initial | ChangeOrigin::External)
    }
}

/// Outcome of the most recent reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No reconcile has finished yet.
    Pending,
    Synced,
    /// The bookmark fetch failed and the static defaults are shown.
    Failed(String),
}

/// One published version of the merged list.
#[derive(Debug, Clone)]
pub struct VideoSnapshot {
    /// Increments on every replace.
    pub revision: u64,
    /// Revision of the latest replace made by neither the sync controller
    /// nor a local toggle.
    pub foreign_revision: u64,
    pub origin: ChangeOrigin,
    pub status: SyncStatus,
    pub videos: Arc<[MergedVideo]>,
}

impl VideoSnapshot {
    pub fn get(&self, id: &VideoId) -> Option<&MergedVideo> {
        self.videos.iter().find(|v| v.id() == id)
    }
}

/// Single source of truth for the merged list, published through a watch channel.
pub struct VideoStore {
    tx: watch::Sender<VideoSnapshot>,
    defaults: Arc<[MergedVideo]>,
}

impl VideoStore {
    /// Seed the store with the catalog and its static bookmark flags.
    pub fn new(catalog: &Catalog) -> Self {
        let defaults: Arc<[MergedVideo]> = catalog
            .videos()
            .iter()
            .cloned()
            .map(MergedVideo::from_static)
            .collect();

        let (tx, _) = watch::channel(VideoSnapshot {
            revision: 0,
            foreign_revision: 0,
            origin: ChangeOrigin::Initial,
            status: SyncStatus::Pending,
            videos: Arc::clone(&defaults),
        });

        Self { tx, defaults }
    }

    pub fn subscribe(&self) -> watch::Receiver<VideoSnapshot> {
        self.tx.subscribe()
    }

    /// Current published snapshot.
    pub fn snapshot(&self) -> VideoSnapshot {
        self.tx.borrow().clone()
    }

    /// The catalog entries with their static flags.
    pub fn defaults(&self) -> Arc<[MergedVideo]> {
        Arc::clone(&self.defaults)
    }

    /// Replace the collection. Returns the new revision.
    pub fn replace(
        &self,
        videos: Arc<[MergedVideo]>,
        origin: ChangeOrigin,
        status: SyncStatus,
    ) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.revision += 1;
            if origin.is_foreign() {
                snapshot.foreign_revision = snapshot.revision;
            }
            snapshot.origin = origin;
            snapshot.status = status;
            snapshot.videos = videos;
            revision = snapshot.revision;
        });
        revision
    }

    /// Replace the collection with a copy where one video's flag is set.
    /// The status is carried over. Returns false if the id is unknown.
    pub fn set_flag(&self, video_id: &VideoId, bookmarked: bool, origin: ChangeOrigin) -> bool {
        let mut found = false;
        self.tx.send_if_modified(|snapshot| {
            if snapshot.get(video_id).is_none() {
                return false;
            }
            found = true;

            let videos: Arc<[MergedVideo]> = snapshot
                .videos
                .iter()
                .map(|v| {
                    let mut v = v.clone();
                    if v.id() == video_id {
                        v.is_bookmarked = bookmarked;
                    }
                    v
                })
                .collect();

            snapshot.revision += 1;
            if origin.is_foreign() {
                snapshot.foreign_revision = snapshot.revision;
            }
            snapshot.origin = origin;
            snapshot.videos = videos;
            true
        });
        found
    }
}

/// Full replace of every flag: bookmarked iff the id is in `ids`.
pub fn merge_bookmarks(defaults: &[MergedVideo], ids: &HashSet<VideoId>) -> Arc<[MergedVideo]> {
    defaults
        .iter()
        .map(|v| MergedVideo {
            video: v.video.clone(),
            is_bookmarked: ids.contains(v.id()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_initial_snapshot_uses_static_flags() {
        let catalog = catalog();
        let store = VideoStore::new(&catalog);
        let snapshot = store.snapshot();

        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.origin, ChangeOrigin::Initial);
        assert_eq!(snapshot.status, SyncStatus::Pending);
        assert_eq!(snapshot.videos.len(), catalog.len());
        for (merged, video) in snapshot.videos.iter().zip(catalog.videos()) {
            assert_eq!(merged.is_bookmarked, video.is_bookmarked);
        }
    }

    #[test]
    fn test_replace_tracks_foreign_revisions() {
        let store = VideoStore::new(&catalog());

        let r1 = store.replace(store.defaults(), ChangeOrigin::Sync, SyncStatus::Synced);
        assert_eq!(r1, 1);
        assert_eq!(store.snapshot().foreign_revision, 0);

        let r2 = store.replace(store.defaults(), ChangeOrigin::External, SyncStatus::Synced);
        assert_eq!(r2, 2);
        assert_eq!(store.snapshot().foreign_revision, 2);
    }

    #[test]
    fn test_set_flag() {
        let store = VideoStore::new(&catalog());
        let id = VideoId::from("1");

        assert!(store.set_flag(&id, true, ChangeOrigin::Local));
        let snapshot = store.snapshot();
        assert!(snapshot.get(&id).unwrap().is_bookmarked);
        assert_eq!(snapshot.origin, ChangeOrigin::Local);
        assert_eq!(snapshot.status, SyncStatus::Pending);
        assert_eq!(snapshot.foreign_revision, 0);

        assert!(!store.set_flag(&VideoId::from("999"), true, ChangeOrigin::Local));
        assert_eq!(store.snapshot().revision, snapshot.revision);
    }

    #[tokio::test]
    async fn test_subscribers_see_replacements() {
        let store = VideoStore::new(&catalog());
        let mut rx = store.subscribe();

        store.replace(store.defaults(), ChangeOrigin::External, SyncStatus::Synced);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().origin, ChangeOrigin::External);
    }

    #[test]
    fn test_merge_bookmarks_is_full_replace() {
        let store = VideoStore::new(&catalog());
        let ids: HashSet<VideoId> = [VideoId::from("1")].into_iter().collect();

        let merged = merge_bookmarks(&store.defaults(), &ids);
        for video in merged.iter() {
            assert_eq!(video.is_bookmarked, video.id().as_str() == "1");
        }
    }
}
