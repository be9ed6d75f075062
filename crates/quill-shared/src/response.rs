//! The canonical response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

use crate::dto::FieldError;

/// Envelope wrapping both successful and failed API responses.
///
/// A success carries `data` and nothing else; a failure carries `error`
/// and, for validation failures only, `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }

    pub fn failure(error: impl Into<String>, details: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
