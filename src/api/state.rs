//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, User, UserCandidate, UserId, UserRepository};
use crate::infrastructure::user::{IdGenerator, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_user_by_id(&self, id: &UserId) -> Option<User>;
    async fn find_by_username(&self, username: &str) -> Option<User>;
    async fn create(&self, candidate: &UserCandidate) -> Result<UserId, DomainError>;
    async fn insert(&self, id: &UserId, candidate: &UserCandidate) -> Result<(), DomainError>;
    async fn count(&self) -> usize;
}

#[async_trait::async_trait]
impl<R, G> UserServiceTrait for UserService<R, G>
where
    R: UserRepository + 'static,
    G: IdGenerator + 'static,
{
    async fn get_user_by_id(&self, id: &UserId) -> Option<User> {
        UserService::get_user_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        UserService::find_by_username(self, username).await
    }

    async fn create(&self, candidate: &UserCandidate) -> Result<UserId, DomainError> {
        UserService::create(self, candidate).await
    }

    async fn insert(&self, id: &UserId, candidate: &UserCandidate) -> Result<(), DomainError> {
        UserService::insert(self, id, candidate).await
    }

    async fn count(&self) -> usize {
        UserService::count(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}
