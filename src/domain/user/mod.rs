//! User domain
//!
//! Domain types for user records: the entity and its identifier, the
//! field-level validation rules, and the repository trait that owns username
//! uniqueness.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserCandidate, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_date_of_birth, validate_email, validate_user, validate_username, UserField,
    ValidationErrors, Violation, MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
