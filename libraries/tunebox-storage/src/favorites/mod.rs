use crate::error::{classify_write_error, timestamp_from_millis};
use crate::songs::{song_from_row, SONG_COLUMNS};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tunebox_core::{
    CoreError, Favorite, FavoriteId, FavoriteStatus, Result, Song, SongId, UserId,
};

fn favorite_from_row(row: &SqliteRow) -> Result<Favorite> {
    let status: String = row.get("status");
    Ok(Favorite {
        id: row.get("id"),
        user_id: row.get("user_id"),
        song_id: row.get("song_id"),
        status: FavoriteStatus::parse(&status)
            .ok_or_else(|| CoreError::storage(format!("Unknown favorite status: {}", status)))?,
        created_at: timestamp_from_millis(row.get("created_at"))?,
    })
}

/// The active favorite for (user, song), if any
pub async fn find_active(
    pool: &SqlitePool,
    user_id: &UserId,
    song_id: &SongId,
) -> Result<Option<Favorite>> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, song_id, status, created_at
        FROM favorites
        WHERE user_id = ? AND song_id = ? AND status = 'active'
        "#,
    )
    .bind(user_id)
    .bind(song_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(favorite_from_row).transpose()
}

/// Create an active favorite.
///
/// The partial unique index on active rows turns a duplicate into
/// `Conflict`; a missing song trips the foreign key and becomes `NotFound`.
pub async fn create(pool: &SqlitePool, user_id: &UserId, song_id: &SongId) -> Result<Favorite> {
    let id = FavoriteId::generate();
    let now = Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO favorites (id, user_id, song_id, status, created_at)
        VALUES (?, ?, ?, 'active', ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(song_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        classify_write_error(
            e,
            || CoreError::conflict("Song already in favorites"),
            || CoreError::not_found("Song", song_id.as_str()),
        )
    })?;

    Ok(Favorite {
        id,
        user_id: user_id.clone(),
        song_id: song_id.clone(),
        status: FavoriteStatus::Active,
        created_at: timestamp_from_millis(now)?,
    })
}

/// Mark the active favorite removed; returns whether one existed
pub async fn remove(pool: &SqlitePool, user_id: &UserId, song_id: &SongId) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE favorites
        SET status = 'removed', removed_at = ?
        WHERE user_id = ? AND song_id = ? AND status = 'active'
        "#,
    )
    .bind(Utc::now().timestamp_millis())
    .bind(user_id)
    .bind(song_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Songs the user currently favorites, in the order they were favorited
pub async fn get_user_favorite_songs(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {SONG_COLUMNS}
        FROM favorites f
        INNER JOIN songs s ON s.id = f.song_id
        WHERE f.user_id = ? AND f.status = 'active'
        ORDER BY f.created_at ASC, f.rowid ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}
