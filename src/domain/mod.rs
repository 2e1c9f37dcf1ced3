//! Domain layer - Core business logic and entities

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{
    User, UserCandidate, UserField, UserId, UserRepository, ValidationErrors, Violation,
};
