//! Domain entities - the core business objects.

mod engagement;
mod post;

pub use engagement::{Engagement, EngagementUpdate};
pub use post::{Post, PostDraft, PostStatus};
