//! User infrastructure module
//!
//! This module provides the in-memory user repository, id generation and the
//! user service that ties validation and storage together.

mod id_generator;
mod repository;
mod service;

pub use id_generator::{IdGenerator, UuidIdGenerator};
pub use repository::InMemoryUserRepository;
pub use service::UserService;
