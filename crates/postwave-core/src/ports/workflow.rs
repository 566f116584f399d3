use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::DispatchError;

/// Body sent to the external workflow endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPayload {
    pub post_id: Uuid,
    pub content: String,
    pub platforms: Vec<String>,
    pub image_url: String,
    pub scheduled_time: DateTime<Utc>,
}

impl From<&Post> for DispatchPayload {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.id,
            content: post.content.clone(),
            platforms: post.platforms.clone(),
            image_url: post.image_url.clone(),
            scheduled_time: post.scheduled_time,
        }
    }
}

/// Client for the external automation workflow.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    /// Perform a single call to the workflow endpoint and return its response body.
    async fn trigger(&self, payload: &DispatchPayload) -> Result<serde_json::Value, DispatchError>;

    /// The URL this client posts to.
    fn endpoint(&self) -> &str;
}
