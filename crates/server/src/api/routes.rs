use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{bookmarks, catalog, handlers, session, users};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Routes that need an authenticated identity
    let protected = Router::new()
        .route(
            "/bookmarks",
            get(bookmarks::list_bookmarks)
                .post(bookmarks::create_bookmark)
                .delete(bookmarks::delete_bookmark),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Catalog
        .route("/catalog", get(catalog::list_catalog))
        // Accounts and sessions
        .route("/users", post(users::create_user))
        .route("/auth/login", post(session::login))
        .route("/auth/session", delete(session::logout))
        .merge(protected)
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
