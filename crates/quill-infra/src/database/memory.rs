//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostPatch};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

struct Entry {
    seq: u64,
    post: Post,
}

#[derive(Default)]
struct Store {
    next_seq: u64,
    posts: HashMap<Uuid, Entry>,
}

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Each operation takes the lock once, so single-record writes are atomic.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).map(|entry| entry.post.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut entries: Vec<&Entry> = store.posts.values().collect();

        // Newest first; equal timestamps fall back to insertion order.
        entries.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(entries.into_iter().map(|entry| entry.post.clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let mut post = Post::create(new_post, Utc::now());
        // Ids are never reused.
        while store.posts.contains_key(&post.id) {
            post.id = Uuid::new_v4();
        }

        let seq = store.next_seq;
        store.next_seq += 1;
        store.posts.insert(
            post.id,
            Entry {
                seq,
                post: post.clone(),
            },
        );

        Ok(post)
    }

    async fn patch(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let entry = store.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        entry.post.apply(patch, Utc::now());
        Ok(entry.post.clone())
    }
}
