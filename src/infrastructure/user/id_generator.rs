//! User ID generation

use crate::domain::user::UserId;

/// Source of fresh user identifiers
///
/// Implementations must never hand out the same id twice.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> UserId;
}

/// Generator producing random UUID v4 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> UserId {
        UserId::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generates_uuid_shaped_ids() {
        let generator = UuidIdGenerator::new();
        let id = generator.generate();

        let parsed = uuid::Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let generator = UuidIdGenerator::new();
        let ids: HashSet<_> = (0..100).map(|_| generator.generate()).collect();

        assert_eq!(ids.len(), 100);
    }
}
