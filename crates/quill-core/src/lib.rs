//! # Quill Core
//!
//! The domain layer of the Quill blog API.
//! This crate holds the post pipeline - validation, error taxonomy, response
//! shaping and orchestration - with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod response;
pub mod service;
pub mod validation;

pub use error::{DomainError, ErrorKind, RepoError};
pub use response::Reply;
pub use service::PostService;
pub use validation::ValidationError;
