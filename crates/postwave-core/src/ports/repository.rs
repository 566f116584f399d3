use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{EngagementUpdate, Post, PostDraft, PostStatus};
use crate::error::RepoError;

/// Authoritative collection of posts.
///
/// Every mutation is atomic per post id: concurrent status updates and
/// engagement merges on the same post never leave it half-written.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Store a new draft post with a fresh id, timestamps and zeroed engagement.
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn get(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts in creation order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Move a post to `status`. Returns `RepoError::NotFound` for unknown ids.
    async fn update_status(&self, id: Uuid, status: PostStatus) -> Result<Post, RepoError>;

    /// Remove a post. Returns whether anything was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Merge metrics into a post's engagement field by field.
    async fn merge_engagement(
        &self,
        id: Uuid,
        update: &EngagementUpdate,
    ) -> Result<Post, RepoError>;
}
