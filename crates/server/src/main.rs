use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelmark_core::account::SessionStore;
use reelmark_core::{
    create_authenticator, load_config, validate_config, AccountService, Authenticator,
    BookmarkService, Catalog, SqliteAccountStore, SqliteBookmarkStore,
};
use reelmark_server::api::create_router;
use reelmark_server::metrics::CATALOG_VIDEOS;
use reelmark_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How often expired sessions are purged from the database
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("REELMARK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        version = VERSION,
        config_hash = &config_hash[..16],
        "Configuration loaded successfully"
    );
    info!("Auth method: {:?}", config.auth.method);
    info!("Database path: {:?}", config.database.path);

    // Load the video catalog
    let catalog = Arc::new(
        Catalog::load(config.catalog.path.as_deref()).context("Failed to load video catalog")?,
    );
    CATALOG_VIDEOS.set(catalog.len() as i64);
    info!("Catalog loaded with {} videos", catalog.len());

    // Create SQLite stores
    let account_store = Arc::new(
        SqliteAccountStore::new(&config.database.path).context("Failed to create account store")?,
    );
    info!("Account store initialized");

    let bookmark_store = Arc::new(
        SqliteBookmarkStore::new(&config.database.path)
            .context("Failed to create bookmark store")?,
    );
    info!("Bookmark store initialized");

    // Create authenticator
    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth, account_store.clone())
            .context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    let bookmarks = Arc::new(BookmarkService::new(
        account_store.clone(),
        bookmark_store,
        config.bookmarks.selected_limit,
    ));
    let accounts = Arc::new(AccountService::new(
        account_store.clone(),
        account_store.clone(),
        config.auth.session_ttl_hours,
    ));

    // Periodically drop expired sessions
    let (shutdown_tx, _) = broadcast::channel(1);
    let purge_handle = spawn_session_purge_loop(account_store, shutdown_tx.subscribe());

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        authenticator,
        catalog,
        bookmarks,
        accounts,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutting down...");
    let _ = shutdown_tx.send(());
    let _ = purge_handle.await;

    Ok(())
}

fn spawn_session_purge_loop(
    sessions: Arc<dyn SessionStore>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    debug!("Session purge loop received shutdown signal");
                    break;
                }
                _ = interval.tick() => {
                    match sessions.purge_expired(chrono::Utc::now()) {
                        Ok(0) => {}
                        Ok(n) => info!("Purged {} expired sessions", n),
                        Err(e) => warn!("Failed to purge expired sessions: {}", e),
                    }
                }
            }
        }
    })
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
