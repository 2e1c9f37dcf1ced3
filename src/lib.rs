//! User Registry API
//!
//! Exposes a single "user" resource over HTTP:
//! - Field validation of submitted users (username, email, date of birth)
//! - Username uniqueness enforced by an in-memory store
//! - Typed outcomes mapped to 200/201/400/404/409 responses

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::user::{InMemoryUserRepository, UserService};
use tracing::info;

/// Create the application state backed by an empty in-memory store
pub fn create_app_state() -> AppState {
    create_app_state_with_repository(Arc::new(InMemoryUserRepository::new()))
}

/// Create the application state around an existing repository
pub fn create_app_state_with_repository(repository: Arc<InMemoryUserRepository>) -> AppState {
    info!("Using in-memory user storage");

    let user_service = UserService::new(repository);

    AppState::new(Arc::new(user_service))
}
