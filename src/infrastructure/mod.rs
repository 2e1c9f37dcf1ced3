//! Infrastructure layer - Storage, id generation and process plumbing

pub mod logging;
pub mod user;
