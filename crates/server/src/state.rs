use reelmark_core::{
    AccountService, Authenticator, BookmarkService, Catalog, Config, SanitizedConfig,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    catalog: Arc<Catalog>,
    bookmarks: Arc<BookmarkService>,
    accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        catalog: Arc<Catalog>,
        bookmarks: Arc<BookmarkService>,
        accounts: Arc<AccountService>,
    ) -> Self {
        Self {
            config,
            authenticator,
            catalog,
            bookmarks,
            accounts,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn bookmarks(&self) -> &BookmarkService {
        &self.bookmarks
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }
}
