//! Display ("outdoor") record persistence
use crate::users::parse_timestamp;
use adboard_core::{
    error::Result, AdboardError, CreateDisplay, Display, DisplayId, DisplayKind, UpdateDisplay,
    UserId,
};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Create a new display.
///
/// The id is allocated as the next available integer (`max(id) + 1`, or 1
/// when no displays exist), inside the insert transaction.
pub async fn create(pool: &SqlitePool, create: CreateDisplay) -> Result<Display> {
    let kind: DisplayKind = create.kind.parse()?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let row = sqlx::query("SELECT COALESCE(MAX(id), 0) + 1 AS next_id FROM displays")
        .fetch_one(&mut *tx)
        .await?;
    let next_id: i64 = row.get("next_id");

    sqlx::query(
        r#"
        INSERT INTO displays (id, name, location, kind, owner, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(next_id)
    .bind(&create.name)
    .bind(&create.location)
    .bind(kind.as_str())
    .bind(create.owner.as_str())
    .bind(now.timestamp())
    .bind(now.timestamp())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Display {
        id: DisplayId::new(next_id),
        name: create.name,
        location: create.location,
        kind,
        owner: create.owner,
        created_at: now,
        updated_at: now,
    })
}

/// Get a display by id
pub async fn get(pool: &SqlitePool, id: DisplayId) -> Result<Option<Display>> {
    let row = sqlx::query(
        "SELECT id, name, location, kind, owner, created_at, updated_at FROM displays WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(|row| display_from_row(&row)).transpose()
}

/// Get all displays
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Display>> {
    let rows = sqlx::query(
        "SELECT id, name, location, kind, owner, created_at, updated_at FROM displays ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(display_from_row).collect()
}

/// Get all displays owned by a user
pub async fn get_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Display>> {
    let rows = sqlx::query(
        "SELECT id, name, location, kind, owner, created_at, updated_at \
         FROM displays WHERE owner = ? ORDER BY id",
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(display_from_row).collect()
}

/// Update a display's metadata.
///
/// Read and write share one transaction so concurrent partial updates
/// cannot interleave and drop each other's fields.
pub async fn update(pool: &SqlitePool, id: DisplayId, update: UpdateDisplay) -> Result<Display> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "SELECT id, name, location, kind, owner, created_at, updated_at FROM displays WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;
    let mut display = row
        .map(|row| display_from_row(&row))
        .transpose()?
        .ok_or(AdboardError::DisplayNotFound(id))?;

    if let Some(name) = update.name {
        display.name = name;
    }
    if let Some(location) = update.location {
        display.location = location;
    }
    if let Some(kind) = update.kind {
        display.kind = kind.parse()?;
    }
    display.updated_at = Utc::now();

    sqlx::query(
        "UPDATE displays SET name = ?, location = ?, kind = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&display.name)
    .bind(&display.location)
    .bind(display.kind.as_str())
    .bind(display.updated_at.timestamp())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(display)
}

/// Delete a display together with its playlist links and overrides
pub async fn delete(pool: &SqlitePool, id: DisplayId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM displays WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AdboardError::DisplayNotFound(id));
    }

    sqlx::query("DELETE FROM display_ads WHERE display_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM display_ad_overrides WHERE display_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

fn display_from_row(row: &SqliteRow) -> Result<Display> {
    Ok(Display {
        id: DisplayId::new(row.get("id")),
        name: row.get("name"),
        location: row.get("location"),
        kind: row.get::<String, _>("kind").parse()?,
        owner: UserId::new(row.get::<String, _>("owner")),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}
