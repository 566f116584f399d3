use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Engagement;
use crate::error::DomainError;

/// Lifecycle state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "draft" => Ok(PostStatus::Draft),
            "scheduled" => Ok(PostStatus::Scheduled),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!(
                "Unknown post status '{}'",
                other
            ))),
        }
    }
}

/// Validated input for creating a post.
///
/// Construction enforces the invariants every stored post carries: content is
/// trimmed and non-empty, platforms are trimmed, deduplicated in their given
/// order, and non-empty.
#[derive(Debug, Clone)]
pub struct PostDraft {
    content: String,
    platforms: Vec<String>,
    scheduled_time: Option<DateTime<Utc>>,
    image_url: String,
}

impl PostDraft {
    pub fn new(
        content: &str,
        platforms: Vec<String>,
        scheduled_time: Option<DateTime<Utc>>,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation(
                "Post content is required".to_string(),
            ));
        }

        let mut unique: Vec<String> = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let platform = platform.trim();
            if !platform.is_empty() && !unique.iter().any(|p| p == platform) {
                unique.push(platform.to_string());
            }
        }
        if unique.is_empty() {
            return Err(DomainError::Validation(
                "At least one platform must be selected".to_string(),
            ));
        }

        Ok(Self {
            content: content.to_string(),
            platforms: unique,
            scheduled_time,
            image_url: image_url.unwrap_or_default(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn scheduled_time(&self) -> Option<DateTime<Utc>> {
        self.scheduled_time
    }

    /// Whether the draft asks for dispatch strictly after `now`.
    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_time.is_some_and(|at| at > now)
    }
}

/// Post entity - a piece of social media content and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    pub platforms: Vec<String>,
    pub scheduled_time: DateTime<Utc>,
    pub image_url: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub engagement: Engagement,
}

impl Post {
    /// Create a new draft post from validated input.
    pub fn new(draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: draft.content,
            platforms: draft.platforms,
            scheduled_time: draft.scheduled_time.unwrap_or(now),
            image_url: draft.image_url,
            status: PostStatus::Draft,
            created_at: now,
            published_at: None,
            engagement: Engagement::default(),
        }
    }

    /// Apply a status transition, keeping `published_at` set only while published.
    pub fn set_status(&mut self, status: PostStatus, now: DateTime<Utc>) {
        self.status = status;
        self.published_at = match status {
            PostStatus::Published => Some(now),
            _ => None,
        };
    }

    /// Content cut to at most `max_chars` characters, with an ellipsis.
    pub fn content_preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.content.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}
