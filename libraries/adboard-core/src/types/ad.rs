/// Ad domain types
use crate::types::{AdId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An advertisement registered by a user.
///
/// `kind` is an open media category ("image", "video", ...) rather than a
/// closed enum: players decide how to render unknown kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ad {
    /// Unique ad identifier
    pub id: AdId,

    /// Ad title
    pub title: String,

    /// Media category ("image", "video", ...)
    pub kind: String,

    /// Playback duration in seconds
    pub duration_seconds: i64,

    /// Reference to the stored media file, if any
    pub media_ref: Option<String>,

    /// Owner user ID
    pub owner: UserId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Ad {
    /// Create a new ad with a generated ID
    pub fn new(create: CreateAd) -> Self {
        let now = Utc::now();
        Self {
            id: AdId::generate(),
            title: create.title,
            kind: create.kind,
            duration_seconds: create.duration_seconds,
            media_ref: create.media_ref,
            owner: create.owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating an ad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAd {
    /// Ad title
    pub title: String,
    /// Media category
    pub kind: String,
    /// Playback duration in seconds
    pub duration_seconds: i64,
    /// Reference to the stored media file, if any
    #[serde(default)]
    pub media_ref: Option<String>,
    /// Owner user ID
    pub owner: UserId,
}

/// Partial update payload for an ad; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAd {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New media category
    #[serde(default)]
    pub kind: Option<String>,
    /// New duration in seconds
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

impl UpdateAd {
    /// Whether the update carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.kind.is_none() && self.duration_seconds.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ad_creation_sets_timestamps() {
        let ad = Ad::new(CreateAd {
            title: "Promo".to_string(),
            kind: "image".to_string(),
            duration_seconds: 10,
            media_ref: None,
            owner: UserId::new("u1@example.com"),
        });

        assert_eq!(ad.title, "Promo");
        assert_eq!(ad.created_at, ad.updated_at);
        assert!(ad.created_at <= Utc::now());
    }

    #[test]
    fn empty_update_detected() {
        assert!(UpdateAd::default().is_empty());
        let update = UpdateAd {
            duration_seconds: Some(20),
            ..UpdateAd::default()
        };
        assert!(!update.is_empty());
    }
}
