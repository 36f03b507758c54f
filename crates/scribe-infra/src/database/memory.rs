//! In-memory post repository - used as fallback when the database is not
//! configured, and as the storage backend in handler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::Post;
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap with an async RwLock.
///
/// Ids are assigned from a process-local monotonic counter, mirroring the
/// auto-increment behavior of the database. Data is lost on restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, mut entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if entity.id == 0 {
            entity.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        store.insert(entity.id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if store.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        // Newest first; ids break ties between posts created within the same
        // timestamp granularity.
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> Post {
        Post::new(title.to_string(), "body".to_string(), "<p>body</p>".to_string())
    }

    #[tokio::test]
    async fn save_assigns_monotonic_ids() {
        let repo = InMemoryPostRepository::new();
        let first = repo.save(post("one")).await.unwrap();
        let second = repo.save(post("two")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn save_with_existing_id_replaces() {
        let repo = InMemoryPostRepository::new();
        let mut saved = repo.save(post("one")).await.unwrap();
        saved.apply_edit("edited".into(), "new".into(), "<p>new</p>".into());
        let updated = repo.save(saved.clone()).await.unwrap();
        assert_eq!(updated.id, saved.id);

        let found = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.title, "edited");
    }

    #[tokio::test]
    async fn list_recent_returns_newest_first() {
        let repo = InMemoryPostRepository::new();
        repo.save(post("one")).await.unwrap();
        repo.save(post("two")).await.unwrap();
        repo.save(post("three")).await.unwrap();

        let posts = repo.list_recent().await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(repo.delete(42).await, Err(RepoError::NotFound)));
    }
}
