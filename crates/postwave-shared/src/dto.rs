//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request to create a post.
///
/// Fields are optional on the wire so that missing values surface as
/// validation errors rather than JSON decoding errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    /// RFC 3339 timestamp; blank or absent means "now".
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request to change a post's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Engagement callback from the workflow service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementWebhookRequest {
    pub post_id: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub engagement: BTreeMap<String, u64>,
}

/// Acknowledgement of an engagement callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementWebhookResponse {
    pub message: String,
    /// Whether the referenced post existed and was updated.
    pub applied: bool,
}

/// Process status summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub workflow_url: String,
    pub webhook_url: String,
    pub posts_count: usize,
    pub scheduled_posts_count: usize,
}

/// Debug overview of every stored post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPostsResponse {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub scheduled_posts: usize,
    pub posts: Vec<DebugPostSummary>,
}

/// One post in the debug overview, with truncated content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPostSummary {
    pub id: String,
    pub content: String,
    pub platforms: Vec<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub engagement: serde_json::Value,
}
