//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Users keyed by id plus the username index, guarded together
#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, UserId>,
}

impl UserTable {
    fn insert(&mut self, id: UserId, user: User) {
        if let Some(previous) = self.users.get(&id) {
            self.username_index.remove(previous.username());
        }

        self.username_index
            .insert(user.username().to_string(), id.clone());
        self.users.insert(id, user);
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    ///
    /// Later entries win when ids repeat; seed data is expected to carry
    /// unique usernames.
    pub fn with_users(users: Vec<(UserId, User)>) -> Self {
        let mut table = UserTable::default();

        for (id, user) in users {
            table.insert(id, user);
        }

        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Option<User> {
        let table = self.table.read().await;
        table.users.get(id).cloned()
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        let table = self.table.read().await;

        table
            .username_index
            .get(username)
            .and_then(|id| table.users.get(id))
            .cloned()
    }

    async fn save(&self, id: &UserId, user: User) -> Result<(), DomainError> {
        // Check and mutate under one write guard
        let mut table = self.table.write().await;

        if let Some(owner) = table.username_index.get(user.username()) {
            if owner != id {
                return Err(DomainError::username_conflict(user.username()));
            }
        }

        table.insert(id.clone(), user);

        Ok(())
    }

    async fn count(&self) -> usize {
        self.table.read().await.users.len()
    }
}
