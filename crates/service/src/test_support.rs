#![cfg(test)]
use std::sync::Arc;

use chrono::{Duration, Utc};
use models::{CreateBookingRequest, CreateClassRequest, CreateUserRequest};

use crate::{storage::MemoryStore, BookingService};

pub fn memory_service() -> BookingService {
    BookingService::new(Arc::new(MemoryStore::new()))
}

pub fn user_request() -> CreateUserRequest {
    CreateUserRequest {
        name: "John".into(),
        surname: "Doe".into(),
        email: "john.doe@example.com".into(),
        phone: "+34123456789".into(),
    }
}

pub fn class_request() -> CreateClassRequest {
    let now = Utc::now();
    CreateClassRequest {
        studio: "Studio 1".into(),
        name: "Yoga".into(),
        start_date: Some(now - Duration::days(20)),
        end_date: Some(now - Duration::days(10)),
        daily_capacity: 10,
    }
}

pub fn booking_request(user_id: &str, class_id: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        class_id: class_id.into(),
        user_id: user_id.into(),
        date: Some(Utc::now() - Duration::days(15)),
    }
}
