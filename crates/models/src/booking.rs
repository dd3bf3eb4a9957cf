use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::class::Class;
use crate::errors::ModelError;
use crate::record::{new_id, Record};
use crate::user::User;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBookingRequest {
    #[serde(rename = "class")]
    pub class_id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub date: Option<DateTime<Utc>>,
}

/// A user's reservation of a class on a given day.
///
/// `class_id` and `user_id` are plain identifiers: nothing guarantees the
/// referenced class or user exists, so readers must handle dangling ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(rename = "class")]
    pub class_id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub date: DateTime<Utc>,
}

impl Booking {
    /// Capacity and class date range are not checked here.
    pub fn new(req: CreateBookingRequest) -> Result<Self, ModelError> {
        if req.class_id.is_empty() {
            return Err(ModelError::validation("class required"));
        }
        if req.user_id.is_empty() {
            return Err(ModelError::validation("user required"));
        }
        let date = match req.date {
            Some(d) if !is_zero_instant(&d) => d,
            _ => return Err(ModelError::validation("date required")),
        };
        Ok(Self { id: new_id(), class_id: req.class_id, user_id: req.user_id, date })
    }
}

impl Record for Booking {
    /// `(user_id, class_id, date)`, exact match.
    type Key = (String, String, DateTime<Utc>);

    const KIND: &'static str = "booking";

    fn id(&self) -> &str { &self.id }

    fn key(&self) -> Self::Key {
        (self.user_id.clone(), self.class_id.clone(), self.date)
    }
}

// 0001-01-01T00:00:00Z is the serialised zero value used for an unset date.
fn is_zero_instant(d: &DateTime<Utc>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| d.naive_utc() == zero)
}

/// Read-only view joining a booking with the class and user it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingFullInfo {
    pub booking: Booking,
    pub class: Class,
    pub user: User,
}

// The nested objects take the place of the `class`/`user` id fields.
impl Serialize for BookingFullInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("BookingFullInfo", 4)?;
        st.serialize_field("id", &self.booking.id)?;
        st.serialize_field("date", &self.booking.date)?;
        st.serialize_field("class", &self.class)?;
        st.serialize_field("user", &self.user)?;
        st.end()
    }
}
