use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the lookup and removal operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Find every entity, newest first.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. Returns [`RepoError::NotFound`] if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository - the persistence port behind the post service.
///
/// Single-record operations are expected to be atomic; nothing more is assumed.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Persist a new post, assigning its id and timestamps.
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Merge the present fields of `patch` into the stored post and refresh
    /// `updated_at`. Returns [`RepoError::NotFound`] if absent.
    async fn patch(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError>;
}
