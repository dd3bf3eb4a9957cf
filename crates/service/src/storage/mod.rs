//! Storage abstractions for service layer
//!
//! `Store` is the persistence contract the orchestrator depends on. Each
//! entity collection enforces uniqueness on the entity's content key (see
//! `models::Record`), not on its identifier. References from bookings to
//! classes and users are not checked on save.

use std::sync::Arc;

use async_trait::async_trait;
use models::{Booking, Class, ListRequest, User};

use crate::errors::ServiceError;

pub mod memory;

pub use memory::MemoryStore;

/// Selector value for the in-memory backend.
pub const BACKEND_MEMORY: &str = "memory";

/// Persistence contract, identical in shape for users, classes and bookings:
/// - `save_*` fails with `AlreadyExists` and stores nothing when a row with the same key exists.
/// - `get_*_by_id` fails with `NotFound` for unknown identifiers.
/// - `get_*_id` returns the identifier of the stored row whose key matches the candidate.
/// - `list_*` returns rows in insertion order, windowed by the request.
#[async_trait]
pub trait Store: Send + Sync {
    async fn save_user(&self, user: &User) -> Result<(), ServiceError>;
    async fn get_user_by_id(&self, id: &str) -> Result<User, ServiceError>;
    async fn get_user_id(&self, user: &User) -> Result<String, ServiceError>;
    async fn list_users(&self, page: ListRequest) -> Result<Vec<User>, ServiceError>;

    async fn save_class(&self, class: &Class) -> Result<(), ServiceError>;
    async fn get_class_by_id(&self, id: &str) -> Result<Class, ServiceError>;
    async fn get_class_id(&self, class: &Class) -> Result<String, ServiceError>;
    async fn list_classes(&self, page: ListRequest) -> Result<Vec<Class>, ServiceError>;

    async fn save_booking(&self, booking: &Booking) -> Result<(), ServiceError>;
    async fn get_booking_by_id(&self, id: &str) -> Result<Booking, ServiceError>;
    async fn get_booking_id(&self, booking: &Booking) -> Result<String, ServiceError>;
    async fn list_bookings(&self, page: ListRequest) -> Result<Vec<Booking>, ServiceError>;
}

/// Build the store named by the configured selector; `None` for unknown backends.
pub fn open_store(selector: &str) -> Option<Arc<dyn Store>> {
    match selector {
        BACKEND_MEMORY => Some(Arc::new(MemoryStore::new())),
        _ => None,
    }
}
