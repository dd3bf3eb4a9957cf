//! JSON envelope shared by every endpoint:
//! `{"status": "ok"|"error", "data": ..., "metadata": {"createdAt": ...}}`.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::errors::ApiError;

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created_at: String,
    /// Stable error code, error responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Identifier of the row a rejected creation collided with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<String>,
}

impl Metadata {
    fn now() -> Self {
        Self {
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            code: None,
            existing_id: None,
        }
    }
}

impl Envelope {
    pub fn ok<T: Serialize>(data: &T) -> Result<Self, ApiError> {
        let data = serde_json::to_value(data).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(Self { status: STATUS_OK, data, metadata: Metadata::now() })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            data: serde_json::Value::String(message.into()),
            metadata: Metadata::now(),
        }
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.metadata.code = Some(code);
        self
    }

    pub fn with_existing_id(mut self, id: Option<String>) -> Self {
        self.metadata.existing_id = id;
        self
    }
}
