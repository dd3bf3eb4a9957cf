//! Service layer of the booking platform.
//! - `storage`: the persistence contract and its in-memory backend.
//! - `booking_service`: validation, persistence and enrichment per use case.
//! - Errors are classified into the three domain kinds of `errors::ServiceError`.

pub mod errors;
pub mod pagination;
pub mod storage;
pub mod booking_service;
#[cfg(test)]
pub mod test_support;

pub use booking_service::BookingService;
pub use errors::ServiceError;
