//! Engagement callback handler.

use actix_web::{HttpResponse, web};

use postwave_core::DomainError;
use postwave_core::domain::EngagementUpdate;
use postwave_shared::dto::{EngagementWebhookRequest, EngagementWebhookResponse};

use super::posts::parse_post_id;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/webhook/engagement
///
/// Stale or unknown post ids are acknowledged with `applied: false` so the
/// reporter is not penalized for them.
pub async fn engagement_webhook(
    state: web::Data<AppState>,
    body: web::Json<EngagementWebhookRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let update = EngagementUpdate(req.engagement);

    let applied = match parse_post_id(&req.post_id) {
        Some(id) => match state
            .reconciler
            .apply(id, req.platform.as_deref(), &update)
            .await
        {
            Ok(_) => true,
            Err(DomainError::NotFound { .. }) => false,
            Err(e) => return Err(e.into()),
        },
        None => false,
    };

    if !applied {
        tracing::info!(post_id = %req.post_id, "Engagement reported for unknown post");
    }

    Ok(HttpResponse::Ok().json(EngagementWebhookResponse {
        message: "Engagement data received".to_string(),
        applied,
    }))
}
