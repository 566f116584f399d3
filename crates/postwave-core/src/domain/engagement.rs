use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Interaction counters reported for a post.
///
/// The three well-known metrics are always present. Reporters may send
/// additional named counters, which are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, u64>,
}

impl Engagement {
    /// Overwrite the fields named in `update`, leaving every other field untouched.
    pub fn merge(&mut self, update: &EngagementUpdate) {
        for (name, value) in &update.0 {
            match name.as_str() {
                "likes" => self.likes = *value,
                "shares" => self.shares = *value,
                "comments" => self.comments = *value,
                _ => {
                    self.extra.insert(name.clone(), *value);
                }
            }
        }
    }
}

/// A partial set of engagement metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngagementUpdate(pub BTreeMap<String, u64>);

impl EngagementUpdate {
    pub fn with(mut self, name: impl Into<String>, value: u64) -> Self {
        self.0.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_preserves_unspecified_fields() {
        let mut engagement = Engagement {
            likes: 0,
            shares: 2,
            comments: 1,
            extra: BTreeMap::new(),
        };

        engagement.merge(&EngagementUpdate::default().with("likes", 5));

        assert_eq!(engagement.likes, 5);
        assert_eq!(engagement.shares, 2);
        assert_eq!(engagement.comments, 1);
    }

    #[test]
    fn test_merge_keeps_extra_metrics() {
        let mut engagement = Engagement::default();
        engagement.merge(&EngagementUpdate::default().with("impressions", 120));
        engagement.merge(&EngagementUpdate::default().with("shares", 3));

        assert_eq!(engagement.extra.get("impressions"), Some(&120));
        assert_eq!(engagement.shares, 3);

        let json = serde_json::to_value(&engagement).unwrap();
        assert_eq!(json["impressions"], 120);
    }

    #[test]
    fn test_update_rejects_negative_counts() {
        let parsed: Result<EngagementUpdate, _> = serde_json::from_str(r#"{"likes": -1}"#);
        assert!(parsed.is_err());
    }
}
