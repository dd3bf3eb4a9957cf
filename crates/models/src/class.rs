use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{new_id, Record};

/// Publication input for a class. Dates are optional on the wire so that a
/// missing bound can be reported as a validation failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateClassRequest {
    pub studio: String,
    #[serde(rename = "class_name")]
    pub name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "capacity")]
    pub daily_capacity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub studio: String,
    #[serde(rename = "class_name")]
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(rename = "capacity")]
    pub daily_capacity: i64,
}

impl Class {
    pub fn new(req: CreateClassRequest) -> Result<Self, ModelError> {
        validate_label("studio", &req.studio)?;
        validate_label("class_name", &req.name)?;
        let start_date = req.start_date.ok_or_else(|| ModelError::validation("start_date required"))?;
        let end_date = req.end_date.ok_or_else(|| ModelError::validation("end_date required"))?;
        validate_range(start_date, end_date)?;
        validate_capacity(req.daily_capacity)?;
        Ok(Self {
            id: new_id(),
            studio: req.studio,
            name: req.name,
            start_date,
            end_date,
            daily_capacity: req.daily_capacity,
        })
    }
}

impl Record for Class {
    /// `(studio, name, start second)`; sub-second differences do not make a new class.
    type Key = (String, String, i64);

    const KIND: &'static str = "class";

    fn id(&self) -> &str { &self.id }

    fn key(&self) -> Self::Key {
        (self.studio.clone(), self.name.clone(), self.start_date.timestamp())
    }
}

fn validate_label(field: &str, value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::validation(format!("{field} required")));
    }
    Ok(())
}

pub fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ModelError> {
    if start > end {
        return Err(ModelError::validation("start_date must not be after end_date"));
    }
    Ok(())
}

pub fn validate_capacity(capacity: i64) -> Result<(), ModelError> {
    if capacity <= 0 {
        return Err(ModelError::validation("capacity must be positive"));
    }
    Ok(())
}
