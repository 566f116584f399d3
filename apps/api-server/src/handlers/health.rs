//! Health check and debug endpoints.

use actix_web::{HttpResponse, web};

use postwave_core::domain::{Post, PostStatus};
use postwave_shared::dto::{DebugPostSummary, DebugPostsResponse, HealthResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

const PREVIEW_CHARS: usize = 50;

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.lifecycle.stats().await?;

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        workflow_url: state.workflow.base_url.clone(),
        webhook_url: state.lifecycle.endpoint().to_string(),
        posts_count: stats.total,
        scheduled_posts_count: stats.pending,
    };

    Ok(HttpResponse::Ok().json(response))
}

fn summarize(post: &Post) -> DebugPostSummary {
    DebugPostSummary {
        id: post.id.to_string(),
        content: post.content_preview(PREVIEW_CHARS),
        platforms: post.platforms.clone(),
        status: post.status.to_string(),
        created_at: post.created_at.to_rfc3339(),
        published_at: post.published_at.map(|t| t.to_rfc3339()),
        engagement: serde_json::to_value(&post.engagement).unwrap_or_default(),
    }
}

/// GET /api/debug/posts
pub async fn debug_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.list().await?;
    let count = |status: PostStatus| posts.iter().filter(|p| p.status == status).count();

    Ok(HttpResponse::Ok().json(DebugPostsResponse {
        total_posts: posts.len(),
        published_posts: count(PostStatus::Published),
        draft_posts: count(PostStatus::Draft),
        scheduled_posts: count(PostStatus::Scheduled),
        posts: posts.iter().map(summarize).collect(),
    }))
}
