//! Domain-level error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// The closed set of failure kinds an operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    Internal,
}

/// Which side of the exchange is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    ClientError,
    ServerError,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::ValidationFailed => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    pub fn status_class(self) -> StatusClass {
        match self {
            ErrorKind::ValidationFailed | ErrorKind::NotFound => StatusClass::ClientError,
            ErrorKind::Internal => StatusClass::ServerError,
        }
    }
}

/// Domain errors - every failure the post service can report.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::ValidationFailed,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The message shown to callers. Never includes internal causes.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Validation(_) => "Validation failed".to_string(),
            DomainError::NotFound { entity_type, .. } => format!("{} not found", entity_type),
            DomainError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
