//! Ad record persistence
use crate::users::parse_timestamp;
use adboard_core::{error::Result, Ad, AdId, AdboardError, CreateAd, UpdateAd, UserId};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Create a new ad
pub async fn create(pool: &SqlitePool, create: CreateAd) -> Result<Ad> {
    let ad = Ad::new(create);

    sqlx::query(
        r#"
        INSERT INTO ads (id, title, kind, duration_seconds, media_ref, owner, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(ad.id.as_str())
    .bind(&ad.title)
    .bind(&ad.kind)
    .bind(ad.duration_seconds)
    .bind(&ad.media_ref)
    .bind(ad.owner.as_str())
    .bind(ad.created_at.timestamp())
    .bind(ad.updated_at.timestamp())
    .execute(pool)
    .await?;

    Ok(ad)
}

/// Get an ad by id
pub async fn get(pool: &SqlitePool, id: &AdId) -> Result<Option<Ad>> {
    let row = sqlx::query(
        "SELECT id, title, kind, duration_seconds, media_ref, owner, created_at, updated_at \
         FROM ads WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(|row| ad_from_row(&row)).transpose()
}

/// Get all ads owned by a user, newest first
pub async fn get_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Ad>> {
    let rows = sqlx::query(
        "SELECT id, title, kind, duration_seconds, media_ref, owner, created_at, updated_at \
         FROM ads WHERE owner = ? ORDER BY created_at DESC",
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(ad_from_row).collect()
}

/// Update an ad's metadata. Only the ad's owner may mutate it.
///
/// Read and write share one transaction so two concurrent partial updates
/// cannot interleave and drop each other's fields.
pub async fn update(
    pool: &SqlitePool,
    id: &AdId,
    caller: &UserId,
    update: UpdateAd,
) -> Result<Ad> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "SELECT id, title, kind, duration_seconds, media_ref, owner, created_at, updated_at \
         FROM ads WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(&mut *tx)
    .await?;
    let mut ad = row
        .map(|row| ad_from_row(&row))
        .transpose()?
        .ok_or_else(|| AdboardError::AdNotFound(id.clone()))?;

    if &ad.owner != caller {
        return Err(AdboardError::PermissionDenied);
    }

    if let Some(title) = update.title {
        ad.title = title;
    }
    if let Some(kind) = update.kind {
        ad.kind = kind;
    }
    if let Some(duration) = update.duration_seconds {
        ad.duration_seconds = duration;
    }
    ad.updated_at = Utc::now();

    sqlx::query(
        "UPDATE ads SET title = ?, kind = ?, duration_seconds = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&ad.title)
    .bind(&ad.kind)
    .bind(ad.duration_seconds)
    .bind(ad.updated_at.timestamp())
    .bind(ad.id.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ad)
}

/// Delete an ad record. Only the ad's owner may delete it.
///
/// Returns the deleted record so the caller can clean up the media file.
/// Playlist rows referencing the ad are left in place and pruned lazily
/// when the playlist is materialized.
pub async fn delete(pool: &SqlitePool, id: &AdId, caller: &UserId) -> Result<Ad> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        "SELECT id, title, kind, duration_seconds, media_ref, owner, created_at, updated_at \
         FROM ads WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(&mut *tx)
    .await?;
    let ad = row
        .map(|row| ad_from_row(&row))
        .transpose()?
        .ok_or_else(|| AdboardError::AdNotFound(id.clone()))?;

    if &ad.owner != caller {
        return Err(AdboardError::PermissionDenied);
    }

    sqlx::query("DELETE FROM ads WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ad)
}

pub(crate) fn ad_from_row(row: &SqliteRow) -> Result<Ad> {
    Ok(Ad {
        id: AdId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        kind: row.get("kind"),
        duration_seconds: row.get("duration_seconds"),
        media_ref: row.get("media_ref"),
        owner: UserId::new(row.get::<String, _>("owner")),
        created_at: parse_timestamp(row.get("created_at"))?,
        updated_at: parse_timestamp(row.get("updated_at"))?,
    })
}
