//! Domain entities of the booking platform and their validators.
//!
//! Every entity is built from a creation request through a constructor that
//! assigns a fresh identifier and validates the content before anything is
//! persisted.

pub mod errors;
pub mod record;
pub mod user;
pub mod class;
pub mod booking;
pub mod list;

pub use booking::{Booking, BookingFullInfo, CreateBookingRequest};
pub use class::{Class, CreateClassRequest};
pub use list::ListRequest;
pub use record::Record;
pub use user::{CreateUserRequest, User};
