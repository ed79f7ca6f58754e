/// Core error types for Adboard
use crate::types::{AdId, DisplayId, UserId};
use thiserror::Error;

/// Result type alias using `AdboardError`
pub type Result<T> = std::result::Result<T, AdboardError>;

/// Core error type for Adboard
#[derive(Error, Debug)]
pub enum AdboardError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. "Ad", "Display")
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Ad not found
    #[error("Ad not found: {0}")]
    AdNotFound(AdId),

    /// Display not found
    #[error("Display not found: {0}")]
    DisplayNotFound(DisplayId),

    /// A display/ad link not found
    #[error("Ad {ad_id} is not linked to display {display_id}")]
    LinkNotFound {
        /// The display side of the missing link
        display_id: DisplayId,
        /// The ad side of the missing link
        ad_id: AdId,
    },

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Permission denied
    #[error("Permission denied")]
    PermissionDenied,

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDeniedWithContext(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl AdboardError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDeniedWithContext(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for AdboardError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
