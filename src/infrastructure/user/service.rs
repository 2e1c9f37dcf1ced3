//! User service orchestrating validation, id assignment and storage

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::domain::user::{User, UserCandidate, UserId, UserRepository};
use crate::domain::DomainError;

use super::id_generator::{IdGenerator, UuidIdGenerator};

fn system_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// User service for registration and lookup
///
/// `create` and `insert` always validate before touching the repository:
/// an invalid candidate yields `DomainError::Validation` and the repository
/// is never called.
#[derive(Debug)]
pub struct UserService<R: UserRepository, G: IdGenerator = UuidIdGenerator> {
    repository: Arc<R>,
    id_generator: Arc<G>,
    today: fn() -> NaiveDate,
}

impl<R: UserRepository> UserService<R, UuidIdGenerator> {
    /// Create a new user service minting UUID ids
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_id_generator(repository, Arc::new(UuidIdGenerator::new()))
    }
}

impl<R: UserRepository, G: IdGenerator> UserService<R, G> {
    /// Create a new user service with a custom id source
    pub fn with_id_generator(repository: Arc<R>, id_generator: Arc<G>) -> Self {
        Self {
            repository,
            id_generator,
            today: system_today,
        }
    }

    /// Replace the clock used to decide whether a date of birth is in the past
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: &UserId) -> Option<User> {
        self.repository.get(id).await
    }

    /// Get a user by username
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.repository.find_by_username(username).await
    }

    /// Number of registered users
    pub async fn count(&self) -> usize {
        self.repository.count().await
    }

    /// Register a new user under a freshly generated ID
    pub async fn create(&self, candidate: &UserCandidate) -> Result<UserId, DomainError> {
        let user = self.validate(candidate)?;
        let id = self.id_generator.generate();

        self.store(&id, user).await?;
        info!(user_id = %id, "User created");

        Ok(id)
    }

    /// Insert or replace the user stored under `id`
    pub async fn insert(&self, id: &UserId, candidate: &UserCandidate) -> Result<(), DomainError> {
        let user = self.validate(candidate)?;

        self.store(id, user).await?;
        info!(user_id = %id, "User stored");

        Ok(())
    }

    fn validate(&self, candidate: &UserCandidate) -> Result<User, DomainError> {
        candidate.validate((self.today)()).map_err(|errors| {
            debug!(%errors, "Rejected user candidate");
            DomainError::from(errors)
        })
    }

    async fn store(&self, id: &UserId, user: User) -> Result<(), DomainError> {
        let username = user.username().to_string();

        self.repository.save(id, user).await.inspect_err(|e| {
            if e.is_conflict() {
                warn!(user_id = %id, username = %username, "Username already taken");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::user::{MockUserRepository, UserField};
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    /// Hands out user-1, user-2, ...
    #[derive(Debug, Default)]
    struct SequentialIdGenerator {
        next: AtomicUsize,
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> UserId {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            UserId::new(format!("user-{}", n)).unwrap()
        }
    }

    fn fixed_today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_service() -> (
        UserService<InMemoryUserRepository, SequentialIdGenerator>,
        Arc<InMemoryUserRepository>,
    ) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let service = UserService::with_id_generator(
            repository.clone(),
            Arc::new(SequentialIdGenerator::default()),
        )
        .with_today(fixed_today);

        (service, repository)
    }

    fn make_candidate(username: &str) -> UserCandidate {
        UserCandidate::new(
            username,
            format!("{}@fakemail.com", username),
            date(1990, 10, 3),
        )
    }

    fn id(value: &str) -> UserId {
        UserId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let (service, _) = create_service();

        let created = service.create(&make_candidate("my_username")).await.unwrap();
        assert_eq!(created.as_str(), "user-1");

        let user = service.get_user_by_id(&created).await.unwrap();
        assert_eq!(UserCandidate::from(user), make_candidate("my_username"));
    }

    #[tokio::test]
    async fn test_create_with_default_generator_mints_uuid() {
        let service = UserService::new(Arc::new(InMemoryUserRepository::new()));

        let created = service.create(&make_candidate("my_username")).await.unwrap();
        assert!(uuid::Uuid::parse_str(created.as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let (service, repository) = create_service();

        service.create(&make_candidate("dup_user")).await.unwrap();

        let result = service.create(&make_candidate("dup_user")).await;
        assert_eq!(result, Err(DomainError::username_conflict("dup_user")));

        // The second minted id was never stored
        assert!(service.get_user_by_id(&id("user-2")).await.is_none());
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_create_invalid_candidates() {
        let (service, repository) = create_service();
        let valid = make_candidate("my_username");

        let candidates = vec![
            UserCandidate {
                username: None,
                ..valid.clone()
            },
            UserCandidate {
                username: Some(String::new()),
                ..valid.clone()
            },
            UserCandidate {
                email: None,
                ..valid.clone()
            },
            UserCandidate {
                email: Some("not_a_email".to_string()),
                ..valid.clone()
            },
            UserCandidate {
                date_of_birth: None,
                ..valid.clone()
            },
            UserCandidate {
                date_of_birth: Some(fixed_today()),
                ..valid.clone()
            },
            UserCandidate {
                date_of_birth: Some(date(2025, 6, 15)),
                ..valid.clone()
            },
        ];

        for candidate in candidates {
            let result = service.create(&candidate).await;
            assert!(
                matches!(result, Err(DomainError::Validation(_))),
                "expected validation error for {:?}",
                candidate
            );
        }

        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_candidate_reports_fields() {
        let (service, _) = create_service();
        let candidate = UserCandidate {
            email: Some("not_a_email".to_string()),
            date_of_birth: None,
            ..make_candidate("my_username")
        };

        let Err(DomainError::Validation(errors)) = service.create(&candidate).await else {
            panic!("expected validation error");
        };

        assert_eq!(errors.fields(), vec![UserField::Email, UserField::DateOfBirth]);
    }

    #[tokio::test]
    async fn test_invalid_candidate_never_reaches_repository() {
        let mut repository = MockUserRepository::new();
        repository.expect_save().never();

        let service = UserService::new(Arc::new(repository)).with_today(fixed_today);
        let candidate = UserCandidate {
            username: Some("ccc".to_string()),
            ..make_candidate("my_username")
        };

        assert!(service.create(&candidate).await.is_err());
        assert!(service.insert(&id("user-1"), &candidate).await.is_err());
    }

    #[tokio::test]
    async fn test_create_saves_under_generated_id() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_save()
            .withf(|id, user| id.as_str() == "user-1" && user.username() == "my_username")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::with_id_generator(
            Arc::new(repository),
            Arc::new(SequentialIdGenerator::default()),
        )
        .with_today(fixed_today);

        let created = service.create(&make_candidate("my_username")).await.unwrap();
        assert_eq!(created, id("user-1"));
    }

    #[tokio::test]
    async fn test_insert_user() {
        let (service, _) = create_service();
        let target = id("2884a717-5a17-49fa-84cc-d4321207c7f9");

        service
            .insert(&target, &make_candidate("user_to_insert"))
            .await
            .unwrap();

        let user = service.get_user_by_id(&target).await.unwrap();
        assert_eq!(user.username(), "user_to_insert");
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_record() {
        let (service, repository) = create_service();
        let target = id("user-a");

        service.insert(&target, &make_candidate("first_name")).await.unwrap();
        service.insert(&target, &make_candidate("second_name")).await.unwrap();

        assert_eq!(repository.count().await, 1);
        assert!(service.find_by_username("first_name").await.is_none());
        assert_eq!(
            service.get_user_by_id(&target).await.unwrap().username(),
            "second_name"
        );
    }

    #[tokio::test]
    async fn test_insert_same_id_twice_is_idempotent() {
        let (service, _) = create_service();
        let target = id("user-a");

        service.insert(&target, &make_candidate("my_username")).await.unwrap();
        service.insert(&target, &make_candidate("my_username")).await.unwrap();

        assert!(service.get_user_by_id(&target).await.is_some());
    }

    #[tokio::test]
    async fn test_insert_duplicate_username_under_other_id() {
        let (service, _) = create_service();

        service.insert(&id("user-a"), &make_candidate("dup_user")).await.unwrap();

        let result = service.insert(&id("user-b"), &make_candidate("dup_user")).await;
        assert!(result.unwrap_err().is_conflict());
        assert!(service.get_user_by_id(&id("user-b")).await.is_none());
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let (service, _) = create_service();

        assert!(service.find_by_username("ghost").await.is_none());

        service.create(&make_candidate("my_username")).await.unwrap();

        let user = service.find_by_username("my_username").await.unwrap();
        assert_eq!(user.email(), "my_username@fakemail.com");
    }
}
