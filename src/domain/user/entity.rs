//! User entity and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{validate_user, ValidationErrors};
use crate::domain::DomainError;

/// User identifier - any non-blank string, UUID shaped when generated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("User ID cannot be empty"));
        }

        Ok(Self(id))
    }

    /// Generate a new random UserId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated user record
///
/// Records are immutable once built; replacing a user means saving a new
/// record under the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    username: String,
    email: String,
    date_of_birth: NaiveDate,
}

impl User {
    pub(crate) fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            date_of_birth,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}

/// User data as received from a caller, before validation
///
/// Every field is optional so that a missing value surfaces as a field
/// violation instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCandidate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl UserCandidate {
    /// Create a candidate with all fields present
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            date_of_birth: Some(date_of_birth),
        }
    }

    /// Validate against `today` and build the user record
    pub fn validate(&self, today: NaiveDate) -> Result<User, ValidationErrors> {
        validate_user(self, today)
    }
}

impl From<User> for UserCandidate {
    fn from(user: User) -> Self {
        Self {
            username: Some(user.username),
            email: Some(user.email),
            date_of_birth: Some(user.date_of_birth),
        }
    }
}
