//! Client-side bookmark synchronization.
//!
//! [`VideoStore`] publishes the catalog merged with the caller's bookmark
//! state; [`BookmarkSyncController`] keeps it reconciled with a
//! [`BookmarkSource`], normally the [`HttpBookmarkClient`].

mod controller;
mod http;
mod source;
mod store;

pub use controller::{BookmarkSyncController, MutationError};
pub use http::HttpBookmarkClient;
pub use source::{BookmarkSource, InProcessBookmarkSource, SyncError};
pub use store::{merge_bookmarks, ChangeOrigin, MergedVideo, SyncStatus, VideoSnapshot, VideoStore};
