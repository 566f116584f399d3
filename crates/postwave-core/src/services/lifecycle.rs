//! Post lifecycle orchestration: draft -> scheduled -> published.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::{DispatchResult, Dispatcher, repo_error};
use crate::domain::{Post, PostDraft, PostStatus};
use crate::error::DomainError;
use crate::ports::{PostScheduler, PostStore};

/// Post counts for health and debug reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    pub total: usize,
    pub drafts: usize,
    pub scheduled: usize,
    pub published: usize,
    /// Posts with an armed dispatch.
    pub pending: usize,
}

/// Decides whether a post is scheduled or dispatched, and applies status changes.
pub struct PostLifecycle {
    store: Arc<dyn PostStore>,
    scheduler: Arc<dyn PostScheduler>,
    dispatcher: Arc<Dispatcher>,
}

impl PostLifecycle {
    pub fn new(
        store: Arc<dyn PostStore>,
        scheduler: Arc<dyn PostScheduler>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            store,
            scheduler,
            dispatcher,
        }
    }

    /// Store a new post, then either arm its scheduled dispatch or dispatch it now.
    ///
    /// Dispatch failures never fail the submission; the returned post is
    /// published whenever it was not scheduled.
    pub async fn submit(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let schedule = draft.is_future(Utc::now());
        let post = self.store.create(draft).await?;

        tracing::info!(
            post_id = %post.id,
            platforms = ?post.platforms,
            "Post stored"
        );

        if schedule {
            let post = self
                .store
                .update_status(post.id, PostStatus::Scheduled)
                .await
                .map_err(repo_error(post.id))?;

            if let Err(e) = self.scheduler.register(&post).await {
                tracing::error!(post_id = %post.id, error = %e, "Failed to schedule post");
                self.store.delete(post.id).await?;
                return Err(e.into());
            }

            tracing::info!(
                post_id = %post.id,
                scheduled_time = %post.scheduled_time,
                "Post scheduled"
            );
            return Ok(post);
        }

        tracing::info!(post_id = %post.id, "Publishing post immediately");
        Ok(self.publish(&post).await)
    }

    /// Dispatch `post` and return it as published, whatever the endpoint said.
    async fn publish(&self, post: &Post) -> Post {
        let dispatched = self.dispatcher.dispatch(post).await;

        match &dispatched.result {
            DispatchResult::Delivered { .. } => {
                tracing::info!(post_id = %post.id, "Post published and delivered");
            }
            DispatchResult::Unreachable { cause } => {
                tracing::info!(
                    post_id = %post.id,
                    cause = %cause,
                    "Post published without reaching the workflow"
                );
            }
        }

        dispatched.post
    }

    /// Apply a direct status transition.
    ///
    /// `published` dispatches the post, `scheduled` arms a dispatch at the
    /// post's scheduled time (which must still be ahead), `draft` disarms it.
    pub async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<Post, DomainError> {
        let post = self.get(id).await?;

        match status {
            PostStatus::Published => {
                self.scheduler.cancel(id).await;
                Ok(self.publish(&post).await)
            }
            PostStatus::Scheduled => {
                if post.scheduled_time <= Utc::now() {
                    return Err(DomainError::Validation(format!(
                        "Scheduled time {} is not in the future",
                        post.scheduled_time.to_rfc3339()
                    )));
                }

                // A failed registration must leave the stored status untouched.
                self.scheduler.register(&post).await?;

                match self.store.update_status(id, PostStatus::Scheduled).await {
                    Ok(post) => Ok(post),
                    Err(e) => {
                        self.scheduler.cancel(id).await;
                        Err(repo_error(id)(e))
                    }
                }
            }
            PostStatus::Draft => {
                self.scheduler.cancel(id).await;
                self.store
                    .update_status(id, PostStatus::Draft)
                    .await
                    .map_err(repo_error(id))
            }
        }
    }

    /// Remove a post and disarm its pending dispatch. Idempotent.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let cancelled = self.scheduler.cancel(id).await;
        let removed = self.store.delete(id).await?;

        tracing::info!(post_id = %id, removed, cancelled, "Post deleted");
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.list().await?)
    }

    /// Posts still waiting for their scheduled dispatch.
    pub async fn scheduled(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts = Vec::new();
        for id in self.scheduler.pending().await {
            if let Some(post) = self.store.get(id).await? {
                posts.push(post);
            }
        }
        Ok(posts)
    }

    pub async fn stats(&self) -> Result<PostStats, DomainError> {
        let posts = self.store.list().await?;
        let count = |status: PostStatus| posts.iter().filter(|p| p.status == status).count();

        Ok(PostStats {
            total: posts.len(),
            drafts: count(PostStatus::Draft),
            scheduled: count(PostStatus::Scheduled),
            published: count(PostStatus::Published),
            pending: self.scheduler.pending().await.len(),
        })
    }

    /// The workflow URL posts are dispatched to.
    pub fn endpoint(&self) -> &str {
        self.dispatcher.endpoint()
    }
}
