use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use super::*;
use crate::domain::{NewPost, PostPatch};
use crate::ports::BaseRepository;

#[derive(Default)]
struct FakeRepo {
    posts: Mutex<Vec<Post>>,
    lookups: AtomicUsize,
    broken: bool,
    vanishing: bool,
}

impl FakeRepo {
    fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    /// Lookups succeed but mutations find nothing, as if a concurrent
    /// delete landed in between.
    fn vanishing() -> Self {
        Self {
            vanishing: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.broken {
            return Err(RepoError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakeRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap().clone();
        posts.reverse();
        Ok(posts)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if self.vanishing || posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakeRepo {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        self.check()?;
        let post = Post::create(new_post, Utc::now());
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn patch(&self, id: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        self.check()?;
        if self.vanishing {
            return Err(RepoError::NotFound);
        }
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.apply(patch, Utc::now());
        Ok(post.clone())
    }
}

fn service_with(repo: FakeRepo) -> (PostService, Arc<FakeRepo>) {
    let repo = Arc::new(repo);
    (PostService::new(repo.clone()), repo)
}

async fn create_post(service: &PostService, title: &str) -> PostResponse {
    let reply = service
        .create(&json!({"title": title, "content": "World"}))
        .await;
    assert!(reply.is_success());
    reply.body.data.unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_defaults() {
    let (service, _) = service_with(FakeRepo::default());

    let reply = service.create(&json!({"title": "Hi", "content": "World"})).await;

    assert_eq!(reply.status, 201);
    let post = reply.body.data.unwrap();
    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "World");
    assert!(!post.published);
    assert_eq!(post.created_at, post.updated_at);
}

#[tokio::test]
async fn test_create_issues_fresh_ids() {
    let (service, _) = service_with(FakeRepo::default());

    let first = create_post(&service, "one").await;
    let second = create_post(&service, "two").await;

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_create_rejects_invalid_payload_without_persisting() {
    let (service, repo) = service_with(FakeRepo::default());

    let reply = service.create(&json!({"title": "", "content": ""})).await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body.error.as_deref(), Some("Validation failed"));
    let details = reply.body.details.unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].field, "title");
    assert_eq!(details[1].field, "content");
    assert!(repo.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_round_trips_created_post() {
    let (service, _) = service_with(FakeRepo::default());
    let created = create_post(&service, "Hi").await;

    let reply = service.get(&created.id).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body.data.unwrap(), created);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (service, _) = service_with(FakeRepo::default());

    let reply = service.get(&Uuid::new_v4().to_string()).await;

    assert_eq!(reply.status, 404);
    assert_eq!(reply.body.error.as_deref(), Some("Post not found"));
    assert!(reply.body.details.is_none());
}

#[tokio::test]
async fn test_malformed_id_skips_repository() {
    let (service, repo) = service_with(FakeRepo::default());

    let reply = service.get("not-a-uuid").await;

    assert_eq!(reply.status, 404);
    assert_eq!(repo.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_list_is_newest_first_and_empty_is_success() {
    let (service, _) = service_with(FakeRepo::default());

    let empty = service.list().await;
    assert_eq!(empty.status, 200);
    assert_eq!(empty.body.data, Some(vec![]));

    create_post(&service, "older").await;
    create_post(&service, "newer").await;

    let titles: Vec<String> = service
        .list()
        .await
        .body
        .data
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["newer", "older"]);
}

#[tokio::test]
async fn test_update_patches_present_fields() {
    let (service, _) = service_with(FakeRepo::default());
    let created = create_post(&service, "Hi").await;

    let reply = service
        .update(&created.id, &json!({"published": true}))
        .await;

    assert_eq!(reply.status, 200);
    let updated = reply.body.data.unwrap();
    assert_eq!(updated.title, "Hi");
    assert_eq!(updated.content, "World");
    assert!(updated.published);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_empty_payload_leaves_fields_unchanged() {
    let (service, _) = service_with(FakeRepo::default());
    let created = create_post(&service, "Hi").await;

    let updated = service
        .update(&created.id, &json!({}))
        .await
        .body
        .data
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.published, created.published);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_is_not_found_even_with_invalid_body() {
    let (service, _) = service_with(FakeRepo::default());
    let missing = Uuid::new_v4().to_string();

    let reply = service.update(&missing, &json!({"title": "X"})).await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body.error.as_deref(), Some("Post not found"));

    let reply = service.update(&missing, &json!({"title": ""})).await;
    assert_eq!(reply.status, 404);
    assert!(reply.body.details.is_none());
}

#[tokio::test]
async fn test_update_rejects_invalid_patch() {
    let (service, _) = service_with(FakeRepo::default());
    let created = create_post(&service, "Hi").await;

    let reply = service
        .update(&created.id, &json!({"title": "t".repeat(101)}))
        .await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.body.details.unwrap()[0].field, "title");
}

#[tokio::test]
async fn test_delete_then_delete_again_is_not_found() {
    let (service, _) = service_with(FakeRepo::default());
    let created = create_post(&service, "Hi").await;

    let reply = service.delete(&created.id).await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body.data.unwrap().message, DELETED_MESSAGE);

    assert_eq!(service.delete(&created.id).await.status, 404);
    assert_eq!(service.get(&created.id).await.status, 404);
}

#[tokio::test]
async fn test_record_vanishing_mid_operation_is_not_found() {
    let (service, repo) = service_with(FakeRepo::vanishing());
    let created = create_post(&service, "Hi").await;
    assert_eq!(repo.posts.lock().unwrap().len(), 1);

    assert_eq!(service.update(&created.id, &json!({})).await.status, 404);
    assert_eq!(service.delete(&created.id).await.status, 404);
}

#[tokio::test]
async fn test_repository_failure_is_internal_without_cause() {
    let (service, _) = service_with(FakeRepo::broken());

    let list = service.list().await;
    assert_eq!(list.status, 500);
    assert_eq!(list.body.error.as_deref(), Some("Internal server error"));
    assert!(list.body.details.is_none());

    let create = service.create(&json!({"title": "Hi", "content": "World"})).await;
    assert_eq!(create.status, 500);

    let get = service.get(&Uuid::new_v4().to_string()).await;
    assert_eq!(get.status, 500);
    assert!(!get.body.error.unwrap().contains("connection refused"));
}
