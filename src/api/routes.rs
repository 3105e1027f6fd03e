use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::require_session;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes -- no session required
    let public_routes = Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/health", get(handlers::health));

    // Protected routes -- every request passes the session gate first
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/payment", post(handlers::add_payment))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
