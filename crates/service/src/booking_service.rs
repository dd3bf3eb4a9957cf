use std::sync::Arc;

use common::metrics::{CONFLICTS_TOTAL, ENTITIES_CREATED_TOTAL, NOT_FOUND_TOTAL, VALIDATION_FAILURES_TOTAL};
use models::{
    Booking, BookingFullInfo, Class, CreateBookingRequest, CreateClassRequest, CreateUserRequest,
    ListRequest, Record, User,
};
use tracing::{debug, error, field::Empty, instrument, warn, Span};

use crate::errors::ServiceError;
use crate::storage::Store;

/// Application service sequencing validation, persistence and enrichment
/// for users, classes and bookings. Holds no state besides the store handle.
///
/// Capacity and class date range are not checked when booking.
pub struct BookingService {
    store: Arc<dyn Store>,
}

impl BookingService {
    pub fn new(store: Arc<dyn Store>) -> Self { Self { store } }

    /// Validate and persist a new user.
    ///
    /// # Examples
    /// ```
    /// use service::{BookingService, ServiceError, storage::MemoryStore};
    /// use models::CreateUserRequest;
    /// use std::sync::Arc;
    /// let svc = BookingService::new(Arc::new(MemoryStore::new()));
    /// let req = CreateUserRequest { name: "John".into(), surname: "Doe".into(), email: "john.doe@example.com".into(), phone: "+34123456789".into() };
    /// let user = tokio_test::block_on(svc.create_user(req.clone())).unwrap();
    /// assert!(!user.id.is_empty());
    /// let again = tokio_test::block_on(svc.create_user(req));
    /// assert!(matches!(again, Err(ServiceError::AlreadyExists { .. })));
    /// ```
    #[instrument(skip(self, req), fields(
        req.user.name = %req.name,
        req.user.surname = %req.surname,
        req.user.email = %req.email,
        req.user.phone = %req.phone,
        user.id = Empty,
    ))]
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ServiceError> {
        let user = User::new(req).map_err(|e| rejected::<User>(e.into()))?;
        Span::current().record("user.id", user.id.as_str());

        if let Err(err) = self.store.save_user(&user).await {
            let existing = self.store.get_user_id(&user).await;
            return Err(conflict::<User>(err, existing));
        }

        created::<User>(&user);
        Ok(user)
    }

    #[instrument(skip(self), fields(req.list.user.offset = ?req.offset, req.list.user.count = ?req.count))]
    pub async fn list_users(&self, req: ListRequest) -> Result<Vec<User>, ServiceError> {
        let users = self.store.list_users(req).await.inspect_err(|e| error!(err = %e, "error listing users"))?;
        if users.is_empty() {
            warn!("no users found");
        } else {
            debug!("found {} users", users.len());
        }
        Ok(users)
    }

    #[instrument(skip(self, req), fields(
        req.class.studio = %req.studio,
        req.class.name = %req.name,
        req.class.date.start = ?req.start_date,
        req.class.date.end = ?req.end_date,
        req.class.capacity = req.daily_capacity,
        class.id = Empty,
    ))]
    pub async fn create_class(&self, req: CreateClassRequest) -> Result<Class, ServiceError> {
        let class = Class::new(req).map_err(|e| rejected::<Class>(e.into()))?;
        Span::current().record("class.id", class.id.as_str());

        if let Err(err) = self.store.save_class(&class).await {
            let existing = self.store.get_class_id(&class).await;
            return Err(conflict::<Class>(err, existing));
        }

        created::<Class>(&class);
        Ok(class)
    }

    #[instrument(skip(self), fields(req.list.classes.offset = ?req.offset, req.list.classes.count = ?req.count))]
    pub async fn list_classes(&self, req: ListRequest) -> Result<Vec<Class>, ServiceError> {
        let classes = self.store.list_classes(req).await.inspect_err(|e| error!(err = %e, "error listing classes"))?;
        if classes.is_empty() {
            warn!("no classes found");
        } else {
            debug!("found {} classes", classes.len());
        }
        Ok(classes)
    }

    /// Persist a booking. The referenced class and user are not looked up.
    #[instrument(skip(self, req), fields(
        req.booking.user_id = %req.user_id,
        req.booking.class_id = %req.class_id,
        req.booking.date = ?req.date,
        booking.id = Empty,
    ))]
    pub async fn create_booking(&self, req: CreateBookingRequest) -> Result<Booking, ServiceError> {
        let booking = Booking::new(req).map_err(|e| rejected::<Booking>(e.into()))?;
        Span::current().record("booking.id", booking.id.as_str());

        if let Err(err) = self.store.save_booking(&booking).await {
            let existing = self.store.get_booking_id(&booking).await;
            return Err(conflict::<Booking>(err, existing));
        }

        created::<Booking>(&booking);
        Ok(booking)
    }

    /// Fetch a booking together with its class and user. A dangling class or
    /// user reference fails the whole lookup with `NotFound`.
    #[instrument(skip(self), fields(
        req.booking.id = %id,
        booking.class.id = Empty,
        booking.user.id = Empty,
    ))]
    pub async fn get_booking(&self, id: &str) -> Result<BookingFullInfo, ServiceError> {
        let booking = self.store.get_booking_by_id(id).await.map_err(missing::<Booking>)?;

        let class = self.store.get_class_by_id(&booking.class_id).await.map_err(missing::<Class>)?;
        Span::current().record("booking.class.id", class.id.as_str());

        let user = self.store.get_user_by_id(&booking.user_id).await.map_err(missing::<User>)?;
        Span::current().record("booking.user.id", user.id.as_str());

        debug!("booking '{}' found", booking.id);
        Ok(BookingFullInfo { booking, class, user })
    }

    #[instrument(skip(self), fields(req.list.booking.offset = ?req.offset, req.list.booking.count = ?req.count))]
    pub async fn list_bookings(&self, req: ListRequest) -> Result<Vec<Booking>, ServiceError> {
        let bookings = self.store.list_bookings(req).await.inspect_err(|e| error!(err = %e, "error listing bookings"))?;
        if bookings.is_empty() {
            warn!("no bookings found");
        } else {
            debug!("found {} bookings", bookings.len());
        }
        Ok(bookings)
    }
}

fn created<T: Record>(row: &T) {
    ENTITIES_CREATED_TOTAL.with_label_values(&[T::KIND]).inc();
    debug!("{} '{}' created", T::KIND, row.id());
}

fn rejected<T: Record>(err: ServiceError) -> ServiceError {
    VALIDATION_FAILURES_TOTAL.with_label_values(&[T::KIND]).inc();
    error!(err = %err, "error creating {}", T::KIND);
    err
}

fn missing<T: Record>(err: ServiceError) -> ServiceError {
    if matches!(err, ServiceError::NotFound(_)) {
        NOT_FOUND_TOTAL.with_label_values(&[T::KIND]).inc();
    }
    error!(err = %err, "error getting {}", T::KIND);
    err
}

/// Attach the conflicting row's id to a failed save. The error kind is kept
/// whatever the lookup returns.
fn conflict<T: Record>(err: ServiceError, existing: Result<String, ServiceError>) -> ServiceError {
    match (err, existing) {
        (ServiceError::AlreadyExists { entity, .. }, Ok(existing_id)) => {
            CONFLICTS_TOTAL.with_label_values(&[entity]).inc();
            error!(existing_id = %existing_id, "{} already exists with id '{}'", T::KIND, existing_id);
            ServiceError::AlreadyExists { entity, existing_id: Some(existing_id) }
        }
        (err, _) => {
            if let ServiceError::AlreadyExists { entity, .. } = &err {
                CONFLICTS_TOTAL.with_label_values(&[entity]).inc();
            }
            error!(err = %err, "error saving {}", T::KIND);
            err
        }
    }
}
