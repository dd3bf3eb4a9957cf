use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{new_id, Record};

/// Registration input for a platform user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// Build a user with a fresh identifier, rejecting malformed contact data.
    pub fn new(req: CreateUserRequest) -> Result<Self, ModelError> {
        validate_email(&req.email)?;
        validate_phone(&req.phone)?;
        Ok(Self {
            id: new_id(),
            name: req.name,
            surname: req.surname,
            email: req.email,
            phone: req.phone,
        })
    }
}

impl Record for User {
    /// `(name, surname, email, phone)`
    type Key = (String, String, String, String);

    const KIND: &'static str = "user";

    fn id(&self) -> &str { &self.id }

    fn key(&self) -> Self::Key {
        (self.name.clone(), self.surname.clone(), self.email.clone(), self.phone.clone())
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !(email.contains('@') && email.contains('.')) {
        return Err(ModelError::validation("invalid email"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ModelError> {
    if !phone.starts_with('+') {
        return Err(ModelError::validation("phone must start with '+' and a country code"));
    }
    Ok(())
}
