use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::users;

/// Create the user resource router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route(
            users::USERS_PATH,
            get(users::find_user).post(users::create_user),
        )
        .route(
            "/api/users/",
            get(users::missing_user_id).put(users::missing_user_id),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::insert_user),
        )
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(create_users_router())
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
