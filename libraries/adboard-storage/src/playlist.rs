//! Playlist engine: display/ad linking, ordering and per-display overrides.
//!
//! Every mutation validates inside its own transaction before writing, so a
//! failed precondition never leaves a partial write behind. Callers decide
//! whether to publish a refresh notification from the returned outcome.
use crate::ads::ad_from_row;
use crate::users::parse_timestamp;
use adboard_core::{
    error::Result, Ad, AdId, AdOverride, AdboardError, DisplayId, OverridePatch, PlaylistLink,
};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::collections::HashSet;

/// Link an ad to a display's playlist.
///
/// Both records must exist, and the ad's owner must equal the display's
/// owner (cross-user linking is forbidden). Appends at the end of the
/// playlist; linking an already-linked ad is a no-op.
///
/// Returns `true` when the playlist actually changed.
pub async fn link(pool: &SqlitePool, display_id: DisplayId, ad_id: &AdId) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let display_owner: String = sqlx::query("SELECT owner FROM displays WHERE id = ?")
        .bind(display_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AdboardError::DisplayNotFound(display_id))?
        .get("owner");

    let ad_owner: String = sqlx::query("SELECT owner FROM ads WHERE id = ?")
        .bind(ad_id.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AdboardError::AdNotFound(ad_id.clone()))?
        .get("owner");

    if display_owner != ad_owner {
        return Err(AdboardError::permission_denied(
            "Ad does not belong to the display's owner",
        ));
    }

    let next_position_row = sqlx::query(
        "SELECT COALESCE(MAX(position), -1) + 1 AS next_pos FROM display_ads WHERE display_id = ?",
    )
    .bind(display_id)
    .fetch_one(&mut *tx)
    .await?;
    let next_position: i64 = next_position_row.get("next_pos");

    let result = sqlx::query(
        r#"
        INSERT INTO display_ads (display_id, ad_id, position, added_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(display_id, ad_id) DO NOTHING
        "#,
    )
    .bind(display_id)
    .bind(ad_id.as_str())
    .bind(next_position)
    .bind(Utc::now().timestamp())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Remove an ad from a display's playlist.
///
/// The link must currently exist. Its override (if any) is removed with
/// it, and remaining positions are resequenced to close the gap.
pub async fn unlink(pool: &SqlitePool, display_id: DisplayId, ad_id: &AdId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM display_ads WHERE display_id = ? AND ad_id = ?")
        .bind(display_id)
        .bind(ad_id.as_str())
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AdboardError::LinkNotFound {
            display_id,
            ad_id: ad_id.clone(),
        });
    }

    sqlx::query("DELETE FROM display_ad_overrides WHERE display_id = ? AND ad_id = ?")
        .bind(display_id)
        .bind(ad_id.as_str())
        .execute(&mut *tx)
        .await?;

    // Close the position gap left by the removed link
    sqlx::query(
        r#"
        UPDATE display_ads
        SET position = (
            SELECT COUNT(*)
            FROM display_ads da2
            WHERE da2.display_id = display_ads.display_id
              AND da2.position < display_ads.position
        )
        WHERE display_id = ?
        "#,
    )
    .bind(display_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Raw playlist links for a display, in playlist order
pub async fn links(pool: &SqlitePool, display_id: DisplayId) -> Result<Vec<PlaylistLink>> {
    let rows = sqlx::query(
        "SELECT display_id, ad_id, position, added_at FROM display_ads \
         WHERE display_id = ? ORDER BY position",
    )
    .bind(display_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(PlaylistLink {
                display_id: DisplayId::new(row.get("display_id")),
                ad_id: AdId::new(row.get::<String, _>("ad_id")),
                position: row.get::<i64, _>("position") as u32,
                added_at: parse_timestamp(row.get("added_at"))?,
            })
        })
        .collect()
}

/// Materialized playlist for a display: ordered, dangling references
/// pruned, override fields applied over the live ad.
pub async fn linked_ads(pool: &SqlitePool, display_id: DisplayId) -> Result<Vec<Ad>> {
    let exists = sqlx::query("SELECT 1 FROM displays WHERE id = ?")
        .bind(display_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AdboardError::DisplayNotFound(display_id));
    }

    // The inner join against ads silently drops links whose ad was deleted
    let rows = sqlx::query(
        r#"
        SELECT
            a.id, a.title, a.kind, a.duration_seconds, a.media_ref, a.owner,
            a.created_at, a.updated_at,
            o.title AS override_title, o.duration_seconds AS override_duration
        FROM display_ads da
        INNER JOIN ads a ON da.ad_id = a.id
        LEFT JOIN display_ad_overrides o
            ON o.display_id = da.display_id AND o.ad_id = da.ad_id
        WHERE da.display_id = ?
        ORDER BY da.position
        "#,
    )
    .bind(display_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let mut ad = ad_from_row(row)?;
            if let Some(title) = row.get::<Option<String>, _>("override_title") {
                ad.title = title;
            }
            if let Some(duration) = row.get::<Option<i64>, _>("override_duration") {
                ad.duration_seconds = duration;
            }
            Ok(ad)
        })
        .collect()
}

/// Replace a display's playlist with `new_order` verbatim.
///
/// Every id in `new_order` must currently be linked; otherwise the call
/// fails with `InvalidInput` and nothing changes. Ids omitted from
/// `new_order` are dropped from the playlist (their overrides are kept —
/// only an explicit unlink removes an override).
pub async fn reorder(pool: &SqlitePool, display_id: DisplayId, new_order: &[AdId]) -> Result<()> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query("SELECT 1 FROM displays WHERE id = ?")
        .bind(display_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AdboardError::DisplayNotFound(display_id));
    }

    let rows = sqlx::query("SELECT ad_id, added_at FROM display_ads WHERE display_id = ?")
        .bind(display_id)
        .fetch_all(&mut *tx)
        .await?;
    let current: std::collections::HashMap<String, i64> = rows
        .into_iter()
        .map(|row| (row.get::<String, _>("ad_id"), row.get::<i64, _>("added_at")))
        .collect();

    let mut seen = HashSet::new();
    for ad_id in new_order {
        if !current.contains_key(ad_id.as_str()) {
            return Err(AdboardError::invalid_input(format!(
                "Ad {ad_id} is not linked to display {display_id}"
            )));
        }
        if !seen.insert(ad_id.as_str()) {
            return Err(AdboardError::invalid_input(format!(
                "Duplicate ad id in order: {ad_id}"
            )));
        }
    }

    sqlx::query("DELETE FROM display_ads WHERE display_id = ?")
        .bind(display_id)
        .execute(&mut *tx)
        .await?;

    for (position, ad_id) in new_order.iter().enumerate() {
        sqlx::query(
            "INSERT INTO display_ads (display_id, ad_id, position, added_at) VALUES (?, ?, ?, ?)",
        )
        .bind(display_id)
        .bind(ad_id.as_str())
        .bind(position as i64)
        .bind(current[ad_id.as_str()])
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// Get the override for a display/ad pairing, if one exists
pub async fn get_override(
    pool: &SqlitePool,
    display_id: DisplayId,
    ad_id: &AdId,
) -> Result<Option<AdOverride>> {
    let row = sqlx::query(
        "SELECT title, duration_seconds FROM display_ad_overrides \
         WHERE display_id = ? AND ad_id = ?",
    )
    .bind(display_id)
    .bind(ad_id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| AdOverride {
        display_id,
        ad_id: ad_id.clone(),
        title: row.get("title"),
        duration_seconds: row.get("duration_seconds"),
    }))
}

/// Apply a partial override for a display/ad pairing.
///
/// The ad must currently be linked and must still exist globally. On the
/// first write the override is seeded from the live ad's title and
/// duration, then only the supplied fields are applied; later calls update
/// only the supplied fields and leave the rest untouched.
pub async fn set_override(
    pool: &SqlitePool,
    display_id: DisplayId,
    ad_id: &AdId,
    patch: OverridePatch,
) -> Result<AdOverride> {
    let mut tx = pool.begin().await?;

    let linked = sqlx::query("SELECT 1 FROM display_ads WHERE display_id = ? AND ad_id = ?")
        .bind(display_id)
        .bind(ad_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;
    if linked.is_none() {
        return Err(AdboardError::LinkNotFound {
            display_id,
            ad_id: ad_id.clone(),
        });
    }

    let existing = sqlx::query(
        "SELECT title, duration_seconds FROM display_ad_overrides \
         WHERE display_id = ? AND ad_id = ?",
    )
    .bind(display_id)
    .bind(ad_id.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let (mut title, mut duration_seconds) = match existing {
        Some(row) => (
            row.get::<String, _>("title"),
            row.get::<i64, _>("duration_seconds"),
        ),
        None => {
            // Seed the baseline from the live ad; a dangling reference
            // cannot take an override.
            let ad = sqlx::query("SELECT title, duration_seconds FROM ads WHERE id = ?")
                .bind(ad_id.as_str())
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AdboardError::AdNotFound(ad_id.clone()))?;
            (
                ad.get::<String, _>("title"),
                ad.get::<i64, _>("duration_seconds"),
            )
        }
    };

    if let Some(new_title) = patch.title {
        title = new_title;
    }
    if let Some(new_duration) = patch.duration_seconds {
        duration_seconds = new_duration;
    }

    sqlx::query(
        r#"
        INSERT INTO display_ad_overrides (display_id, ad_id, title, duration_seconds)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(display_id, ad_id) DO UPDATE
            SET title = excluded.title, duration_seconds = excluded.duration_seconds
        "#,
    )
    .bind(display_id)
    .bind(ad_id.as_str())
    .bind(&title)
    .bind(duration_seconds)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(AdOverride {
        display_id,
        ad_id: ad_id.clone(),
        title,
        duration_seconds,
    })
}

/// Ids of all displays whose playlist currently contains the ad
pub async fn displays_linking(pool: &SqlitePool, ad_id: &AdId) -> Result<Vec<DisplayId>> {
    let rows = sqlx::query("SELECT display_id FROM display_ads WHERE ad_id = ? ORDER BY display_id")
        .bind(ad_id.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| DisplayId::new(row.get("display_id")))
        .collect())
}
