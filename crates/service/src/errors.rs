use models::errors::ModelError;
use thiserror::Error;

/// Domain failures. All three kinds are terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    /// `existing_id` is the identifier of the stored row with the same
    /// content key, when it could be recovered.
    #[error("{entity} already exists")]
    AlreadyExists { entity: &'static str, existing_id: Option<String> },
    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn already_exists(entity: &'static str) -> Self {
        Self::AlreadyExists { entity, existing_id: None }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::AlreadyExists { .. } => 1002,
            ServiceError::NotFound(_) => 1003,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_become_validation() {
        let e: ServiceError = ModelError::validation("invalid email").into();
        assert_eq!(e, ServiceError::Validation("invalid email".into()));
        assert_eq!(e.code(), 1001);
    }

    #[test]
    fn messages_name_the_entity() {
        assert_eq!(ServiceError::already_exists("user").to_string(), "user already exists");
        assert_eq!(ServiceError::not_found("booking").to_string(), "booking not found");
    }
}
