//! Engagement reconciliation from external reporters.

use std::sync::Arc;

use uuid::Uuid;

use super::repo_error;
use crate::domain::{EngagementUpdate, Post};
use crate::error::DomainError;
use crate::ports::PostStore;

/// Merges asynchronously reported metrics into stored posts.
pub struct EngagementReconciler {
    store: Arc<dyn PostStore>,
}

impl EngagementReconciler {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Merge `update` into the engagement of `post_id`.
    ///
    /// Unknown ids yield `DomainError::NotFound` and change nothing.
    pub async fn apply(
        &self,
        post_id: Uuid,
        platform: Option<&str>,
        update: &EngagementUpdate,
    ) -> Result<Post, DomainError> {
        let post = self
            .store
            .merge_engagement(post_id, update)
            .await
            .map_err(repo_error(post_id))?;

        tracing::info!(
            post_id = %post_id,
            platform = platform.unwrap_or("unknown"),
            metrics = update.0.len(),
            "Engagement merged"
        );

        Ok(post)
    }
}
