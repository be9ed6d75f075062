//! Post service - the validated request pipeline.
//!
//! Each operation runs validate, locate, mutate and respond in order and
//! always yields a [`Reply`]. Validation and not-found outcomes are expected
//! results; anything the repository fails with becomes `Internal`.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use quill_shared::{DeletedResponse, PostResponse};

use crate::domain::Post;
use crate::error::{DomainError, ErrorKind, RepoError};
use crate::ports::PostRepository;
use crate::response::{Reply, STATUS_CREATED, STATUS_OK};
use crate::validation::{validate_create, validate_update};

pub const DELETED_MESSAGE: &str = "Post deleted successfully";

/// Orchestrates post operations over an injected [`PostRepository`].
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts, newest first. An empty list is a success.
    pub async fn list(&self) -> Reply<Vec<PostResponse>> {
        let result: Result<Vec<PostResponse>, DomainError> = self
            .repo
            .find_all()
            .await
            .map(|posts| posts.into_iter().map(PostResponse::from).collect())
            .map_err(DomainError::from);

        finish("list", result, STATUS_OK)
    }

    pub async fn get(&self, id: &str) -> Reply<PostResponse> {
        let result = self.load(id).await.map(PostResponse::from);
        finish("get", result, STATUS_OK)
    }

    pub async fn create(&self, payload: &Value) -> Reply<PostResponse> {
        finish("create", self.try_create(payload).await, STATUS_CREATED)
    }

    /// Existence is checked before the payload is validated, so a missing
    /// post always answers `NotFound` regardless of the body.
    pub async fn update(&self, id: &str, payload: &Value) -> Reply<PostResponse> {
        finish("update", self.try_update(id, payload).await, STATUS_OK)
    }

    pub async fn delete(&self, id: &str) -> Reply<DeletedResponse> {
        finish("delete", self.try_delete(id).await, STATUS_OK)
    }

    async fn try_create(&self, payload: &Value) -> Result<PostResponse, DomainError> {
        let new_post = validate_create(payload)?;
        let post = self.repo.insert(new_post).await?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post.into())
    }

    async fn try_update(&self, id: &str, payload: &Value) -> Result<PostResponse, DomainError> {
        let existing = self.load(id).await?;
        let patch = validate_update(payload)?;

        let post = self
            .repo
            .patch(existing.id, patch)
            .await
            .map_err(|e| vanished(e, id))?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post.into())
    }

    async fn try_delete(&self, id: &str) -> Result<DeletedResponse, DomainError> {
        let existing = self.load(id).await?;
        self.repo
            .delete(existing.id)
            .await
            .map_err(|e| vanished(e, id))?;

        tracing::info!(post_id = %existing.id, "Post deleted");
        Ok(DeletedResponse::new(DELETED_MESSAGE))
    }

    /// Resolve a raw id to a live post. Ids that are not valid UUIDs can
    /// never exist, so the repository is not consulted for them.
    async fn load(&self, id: &str) -> Result<Post, DomainError> {
        let uuid = Uuid::parse_str(id).map_err(|_| DomainError::post_not_found(id))?;

        self.repo
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}

/// The post existed at lookup but was gone by the time we mutated it.
fn vanished(err: RepoError, id: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}

fn finish<T>(operation: &'static str, result: Result<T, DomainError>, status: u16) -> Reply<T> {
    if let Err(err) = &result {
        match err.kind() {
            ErrorKind::Internal => {
                tracing::error!(operation, error = %err, "Post operation failed");
            }
            ErrorKind::ValidationFailed | ErrorKind::NotFound => {
                tracing::debug!(operation, error = %err, "Post operation rejected");
            }
        }
    }

    Reply::from_result(result, status)
}

#[cfg(test)]
mod tests;
