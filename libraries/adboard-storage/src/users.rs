//! User account persistence
use adboard_core::{error::Result, AdboardError, User, UserId};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

/// Create a new user account.
///
/// Fails with `Duplicate` if the email is already registered.
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<User> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query("SELECT 1 FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(AdboardError::Duplicate(format!(
            "Email already registered: {email}"
        )));
    }

    let user = User::new(email, name);

    sqlx::query("INSERT INTO users (email, name, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(password_hash)
        .bind(user.created_at.timestamp())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user)
}

/// Get a user by id (email)
pub async fn get(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT email, name, created_at FROM users WHERE email = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.map(|row| {
        Ok(User::with_created_at(
            UserId::new(row.get::<String, _>("email")),
            row.get::<String, _>("name"),
            parse_timestamp(row.get("created_at"))?,
        ))
    })
    .transpose()
}

/// Get the stored password hash for a user
pub async fn get_password_hash(pool: &SqlitePool, id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM users WHERE email = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Get all users, ordered by name
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT email, name, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(User::with_created_at(
                UserId::new(row.get::<String, _>("email")),
                row.get::<String, _>("name"),
                parse_timestamp(row.get("created_at"))?,
            ))
        })
        .collect()
}

pub(crate) fn parse_timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| AdboardError::storage("Invalid timestamp"))
}
