//! Post handlers.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use postwave_core::DomainError;
use postwave_core::domain::{PostDraft, PostStatus};
use postwave_shared::MessageResponse;
use postwave_shared::dto::{CreatePostRequest, UpdateStatusRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Path ids that are not UUIDs cannot name a stored post.
pub(super) fn parse_post_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Offset-free forms sent by `datetime-local` inputs. Read as UTC.
const LOCAL_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_scheduled_time(raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match DateTime::parse_from_rfc3339(s) {
        Ok(t) => Ok(Some(t.with_timezone(&Utc))),
        Err(e) => LOCAL_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(|naive| Some(naive.and_utc()))
            .ok_or_else(|| AppError::BadRequest(format!("Invalid scheduledTime '{}': {}", s, e))),
    }
}

fn describe_image(image_url: Option<&str>) -> &'static str {
    match image_url {
        None | Some("") => "none",
        Some(url) if url.starts_with("data:") => "inline",
        Some(_) => "remote",
    }
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.list().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/scheduled-posts
pub async fn list_scheduled(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.lifecycle.scheduled().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    tracing::info!(
        content_chars = req.content.as_deref().map_or(0, |c| c.chars().count()),
        platforms = ?req.platforms,
        scheduled_time = ?req.scheduled_time,
        image = describe_image(req.image_url.as_deref()),
        "Creating new post"
    );

    let scheduled_time = parse_scheduled_time(req.scheduled_time.as_deref())?;
    let draft = PostDraft::new(
        req.content.as_deref().unwrap_or_default(),
        req.platforms.unwrap_or_default(),
        scheduled_time,
        req.image_url,
    )?;

    let post = state.lifecycle.submit(draft).await.map_err(|e| match e {
        DomainError::Validation(_) => AppError::from(e),
        other => AppError::internal("Failed to create post", other.to_string()),
    })?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}/status
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path).ok_or(AppError::NotFound)?;
    let status: PostStatus = body.status.parse()?;

    let post = state.lifecycle.set_status(id, status).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    if let Some(id) = parse_post_id(&path) {
        state.lifecycle.delete(id).await?;
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}
