/// User domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The identifier is the user's email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier (email)
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(email),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user with a known creation time (for database loading)
    pub fn with_created_at(
        id: UserId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_creation() {
        let user = User::new("alice@example.com", "Alice");
        assert_eq!(user.id.as_str(), "alice@example.com");
        assert_eq!(user.name, "Alice");
        assert!(user.created_at <= Utc::now());
    }
}
