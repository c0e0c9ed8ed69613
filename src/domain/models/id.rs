#[cfg(test)]
#[path = "id_test.rs"]
mod tests;

use uuid::Uuid;

/// Source of opaque identifiers for messages, media items, and annotations.
/// Identifiers must never repeat within one session.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Short identifiers built from the first two groups of a v4 UUID.
#[derive(Default)]
pub struct UuidIds {}

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<&str>>()
            .join("-");
    }
}
