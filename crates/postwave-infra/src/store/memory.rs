//! In-memory post store.
//!
//! A single async RwLock guards the whole table, so every mutation of a
//! post is applied in one critical section.
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use postwave_core::domain::{EngagementUpdate, Post, PostDraft, PostStatus};
use postwave_core::error::RepoError;
use postwave_core::ports::PostStore;

#[derive(Default)]
struct PostTable {
    posts: HashMap<Uuid, Post>,
    /// Ids in creation order.
    order: Vec<Uuid>,
}

/// In-memory post store using a HashMap with an async RwLock.
pub struct InMemoryPostStore {
    table: RwLock<PostTable>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(PostTable::default()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let post = Post::new(draft, Utc::now());

        let mut table = self.table.write().await;
        table.order.push(post.id);
        table.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = %post.id, total = table.order.len(), "Post inserted");
        Ok(post)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.posts.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.posts.get(id).cloned())
            .collect())
    }

    async fn update_status(&self, id: Uuid, status: PostStatus) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let post = table.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.set_status(status, Utc::now());
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut table = self.table.write().await;
        let removed = table.posts.remove(&id).is_some();
        if removed {
            table.order.retain(|existing| *existing != id);
        }
        Ok(removed)
    }

    async fn merge_engagement(
        &self,
        id: Uuid,
        update: &EngagementUpdate,
    ) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let post = table.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.engagement.merge(update);
        Ok(post.clone())
    }
}
