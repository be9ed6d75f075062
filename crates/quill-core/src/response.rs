//! Response envelope builder.
//!
//! Pairs an [`ApiResponse`] body with its HTTP status. Building a reply has
//! no side effects; logging internal failures is left to the caller.

use quill_shared::ApiResponse;

use crate::error::DomainError;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;

/// A fully shaped response: status code plus envelope body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub status: u16,
    pub body: ApiResponse<T>,
}

impl<T> Reply<T> {
    pub fn success(data: T) -> Self {
        Self::success_with_status(data, STATUS_OK)
    }

    pub fn created(data: T) -> Self {
        Self::success_with_status(data, STATUS_CREATED)
    }

    pub fn success_with_status(data: T, status: u16) -> Self {
        Self {
            status,
            body: ApiResponse::ok(data),
        }
    }

    pub fn failure(err: &DomainError) -> Self {
        let details = match err {
            DomainError::Validation(validation) => Some(validation.violations().to_vec()),
            DomainError::NotFound { .. } | DomainError::Internal(_) => None,
        };

        Self {
            status: err.kind().status_code(),
            body: ApiResponse::failure(err.public_message(), details),
        }
    }

    /// Wrap a service result, using `status` for the success case.
    pub fn from_result(result: Result<T, DomainError>, status: u16) -> Self {
        match result {
            Ok(data) => Self::success_with_status(data, status),
            Err(err) => Self::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.body.success
    }
}
