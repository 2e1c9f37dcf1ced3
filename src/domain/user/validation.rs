//! User validation utilities

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::entity::{User, UserCandidate};

/// Minimum username length in characters
pub const MIN_USERNAME_LENGTH: usize = 4;

/// Maximum username length in characters
pub const MAX_USERNAME_LENGTH: usize = 20;

/// local-part "@" domain, where the domain has at least one dot
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Field of a user record that a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UserField {
    Username,
    Email,
    DateOfBirth,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::DateOfBirth => "dateOfBirth",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed rule on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: UserField,
    pub message: String,
}

impl Violation {
    pub fn new(field: UserField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found on a candidate, at most one per field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.0))]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Fields that failed validation, in rule order
    pub fn fields(&self) -> Vec<UserField> {
        self.0.iter().map(|v| v.field).collect()
    }

    pub fn contains(&self, field: UserField) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a username
///
/// Rules:
/// - Cannot be empty or only whitespace
/// - Minimum 4 characters
/// - Maximum 20 characters
pub fn validate_username(username: &str) -> Result<(), Violation> {
    if username.trim().is_empty() {
        return Err(Violation::new(
            UserField::Username,
            "Username cannot be empty",
        ));
    }

    let length = username.chars().count();

    if length < MIN_USERNAME_LENGTH {
        return Err(Violation::new(
            UserField::Username,
            format!(
                "Username is too short. Minimum length is {} characters",
                MIN_USERNAME_LENGTH
            ),
        ));
    }

    if length > MAX_USERNAME_LENGTH {
        return Err(Violation::new(
            UserField::Username,
            format!(
                "Username exceeds maximum length of {} characters",
                MAX_USERNAME_LENGTH
            ),
        ));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), Violation> {
    if email.trim().is_empty() {
        return Err(Violation::new(UserField::Email, "Email cannot be empty"));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(Violation::new(
            UserField::Email,
            format!("'{}' is not a valid email address", email),
        ));
    }

    Ok(())
}

/// Validate a date of birth; it must lie strictly before `today`
pub fn validate_date_of_birth(
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> Result<(), Violation> {
    if date_of_birth >= today {
        return Err(Violation::new(
            UserField::DateOfBirth,
            "Date of birth must be in the past",
        ));
    }

    Ok(())
}

/// Validate a candidate and build the user record
///
/// Every field is checked; the error lists one violation per failing field.
pub fn validate_user(
    candidate: &UserCandidate,
    today: NaiveDate,
) -> Result<User, ValidationErrors> {
    let username = match &candidate.username {
        Some(username) => validate_username(username).map(|_| username.as_str()),
        None => Err(Violation::new(UserField::Username, "Username is required")),
    };

    let email = match &candidate.email {
        Some(email) => validate_email(email).map(|_| email.as_str()),
        None => Err(Violation::new(UserField::Email, "Email is required")),
    };

    let date_of_birth = match candidate.date_of_birth {
        Some(date) => validate_date_of_birth(date, today).map(|_| date),
        None => Err(Violation::new(
            UserField::DateOfBirth,
            "Date of birth is required",
        )),
    };

    match (username, email, date_of_birth) {
        (Ok(username), Ok(email), Ok(date_of_birth)) => {
            Ok(User::new(username, email, date_of_birth))
        }
        (username, email, date_of_birth) => {
            let mut violations = Vec::new();
            violations.extend(username.err());
            violations.extend(email.err());
            violations.extend(date_of_birth.err());
            Err(ValidationErrors(violations))
        }
    }
}
