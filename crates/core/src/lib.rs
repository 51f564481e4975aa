pub mod account;
pub mod auth;
pub mod bookmark;
pub mod catalog;
pub mod config;
pub mod db;
pub mod metrics;
pub mod signup;
pub mod sync;
pub mod testing;
pub mod view;

pub use account::{AccountError, AccountService, SqliteAccountStore, UserSummary};
pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, Identity, SessionAuthenticator,
    TrustedHeaderAuthenticator,
};
pub use bookmark::{
    BookmarkError, BookmarkRecord, BookmarkScope, BookmarkService, SqliteBookmarkStore,
};
pub use catalog::{Catalog, CatalogError, Category, Video, VideoId};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    SanitizedConfig,
};
pub use db::StoreError;
pub use sync::{
    BookmarkSource, BookmarkSyncController, HttpBookmarkClient, MergedVideo, MutationError,
    SyncError, SyncStatus, VideoStore,
};
pub use view::{BookmarkPage, PageState, Section};
