//! # Quill Shared
//!
//! Wire types shared between the API server and its clients.
//! Nothing in here knows about persistence or validation rules.

pub mod dto;
pub mod response;

pub use dto::{DeletedResponse, FieldError, PostResponse};
pub use response::ApiResponse;
