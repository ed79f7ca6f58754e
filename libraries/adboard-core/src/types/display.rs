/// Display ("outdoor") domain types
use crate::error::AdboardError;
use crate::types::{DisplayId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hardware kind of a display surface.
///
/// Stored case-normalized: `LED` and `LCD` upper-case, `projector`
/// lower-case. Parsing accepts any casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayKind {
    /// LED panel
    #[serde(rename = "LED")]
    Led,
    /// LCD screen
    #[serde(rename = "LCD")]
    Lcd,
    /// Projector surface
    #[serde(rename = "projector")]
    Projector,
}

impl DisplayKind {
    /// Canonical storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayKind::Led => "LED",
            DisplayKind::Lcd => "LCD",
            DisplayKind::Projector => "projector",
        }
    }
}

impl FromStr for DisplayKind {
    type Err = AdboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "led" => Ok(DisplayKind::Led),
            "lcd" => Ok(DisplayKind::Lcd),
            "projector" => Ok(DisplayKind::Projector),
            other => Err(AdboardError::invalid_input(format!(
                "Display kind must be LED, LCD or projector, got: {other}"
            ))),
        }
    }
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical or virtual advertising surface with an ordered playlist of ads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    /// Unique display identifier
    pub id: DisplayId,

    /// Human-readable name
    pub name: String,

    /// Physical location description
    pub location: String,

    /// Hardware kind
    pub kind: DisplayKind,

    /// Owner user ID
    pub owner: UserId,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDisplay {
    /// Human-readable name
    pub name: String,
    /// Physical location description
    pub location: String,
    /// Hardware kind (any casing accepted)
    pub kind: String,
    /// Owner user ID
    pub owner: UserId,
}

/// Partial update payload for a display; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDisplay {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New location
    #[serde(default)]
    pub location: Option<String>,
    /// New hardware kind (any casing accepted)
    #[serde(default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_normalizes_case() {
        assert_eq!("led".parse::<DisplayKind>().unwrap(), DisplayKind::Led);
        assert_eq!("Lcd".parse::<DisplayKind>().unwrap(), DisplayKind::Lcd);
        assert_eq!(
            "PROJECTOR".parse::<DisplayKind>().unwrap(),
            DisplayKind::Projector
        );
        assert_eq!(DisplayKind::Led.as_str(), "LED");
        assert_eq!(DisplayKind::Projector.as_str(), "projector");
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!("plasma".parse::<DisplayKind>().is_err());
    }

    #[test]
    fn kind_serde_uses_canonical_form() {
        let json = serde_json::to_string(&DisplayKind::Lcd).unwrap();
        assert_eq!(json, "\"LCD\"");
        let back: DisplayKind = serde_json::from_str("\"projector\"").unwrap();
        assert_eq!(back, DisplayKind::Projector);
    }
}
