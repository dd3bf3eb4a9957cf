//! Shared behaviour of stored entities.

use std::hash::Hash;

use uuid::Uuid;

/// An entity with an opaque identifier and a content-derived uniqueness key.
///
/// Two records with equal keys are duplicates even when their identifiers differ.
pub trait Record: Clone + Send + Sync + 'static {
    type Key: Eq + Hash + Clone + Send + Sync + std::fmt::Debug;

    /// Entity kind, used in error messages, log fields and metric labels.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn key(&self) -> Self::Key;
}

/// Fresh random identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
