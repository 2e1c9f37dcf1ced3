//! User repository trait

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Implementations own the username uniqueness invariant: no two ids may hold
/// users with the same username at the same time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Option<User>;

    /// Find the user with exactly this username
    async fn find_by_username(&self, username: &str) -> Option<User>;

    /// Insert or replace the user stored under `id`
    ///
    /// Fails with `DomainError::UsernameConflict` when the username is held by
    /// a different id; the stored state is unchanged in that case.
    async fn save(&self, id: &UserId, user: User) -> Result<(), DomainError>;

    /// Number of stored users
    async fn count(&self) -> usize;
}
