/// Playlist link and override domain types
use crate::types::{AdId, DisplayId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display/ad link association contributing to the display's playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistLink {
    /// Display ID
    pub display_id: DisplayId,

    /// Ad ID
    pub ad_id: AdId,

    /// Position in the playlist (0-indexed)
    pub position: u32,

    /// When the ad was linked to the display
    pub added_at: DateTime<Utc>,
}

/// Per-display override of an ad's presentation fields.
///
/// Both fields are always populated: the record is seeded from the live ad
/// the first time any override field is written for the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdOverride {
    /// Display ID
    pub display_id: DisplayId,

    /// Ad ID
    pub ad_id: AdId,

    /// Overridden title
    pub title: String,

    /// Overridden duration in seconds
    pub duration_seconds: i64,
}

/// Partial override request; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverridePatch {
    /// New overridden title
    #[serde(default)]
    pub title: Option<String>,
    /// New overridden duration in seconds
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

impl OverridePatch {
    /// Whether the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.duration_seconds.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_link_ordering_field() {
        let link = PlaylistLink {
            display_id: DisplayId::new(1),
            ad_id: AdId::new("ad-1"),
            position: 5,
            added_at: Utc::now(),
        };
        assert_eq!(link.position, 5);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(OverridePatch::default().is_empty());
        let patch = OverridePatch {
            title: Some("New title".to_string()),
            duration_seconds: None,
        };
        assert!(!patch.is_empty());
    }
}
