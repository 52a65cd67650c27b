use crate::error::{classify_write_error, timestamp_from_millis};
use crate::songs::{song_from_row, SONG_COLUMNS};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::{HashMap, HashSet};
use tunebox_core::{CoreError, Playlist, PlaylistId, PlaylistWithSongs, Result, SongId, UserId};

fn playlist_from_row(row: &SqliteRow, songs: Vec<SongId>) -> Result<Playlist> {
    Ok(Playlist {
        id: row.get("id"),
        name: row.get("name"),
        owner_id: row.get("owner_id"),
        songs,
        created_at: timestamp_from_millis(row.get("created_at"))?,
    })
}

/// Membership of one playlist in insertion order
async fn members(pool: &SqlitePool, id: &PlaylistId) -> Result<Vec<SongId>> {
    let rows = sqlx::query(
        "SELECT song_id FROM playlist_songs WHERE playlist_id = ? ORDER BY position ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(dedup(rows.iter().map(|row| row.get("song_id"))))
}

fn dedup(ids: impl IntoIterator<Item = SongId>) -> Vec<SongId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Create a new, empty playlist
pub async fn create(pool: &SqlitePool, name: &str, owner: &UserId) -> Result<Playlist> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::invalid_argument("Playlist name is required"));
    }

    let id = PlaylistId::generate();
    let now = Utc::now().timestamp_millis();

    sqlx::query("INSERT INTO playlists (id, name, owner_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(owner)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(Playlist {
        id,
        name: name.to_string(),
        owner_id: owner.clone(),
        songs: Vec::new(),
        created_at: timestamp_from_millis(now)?,
    })
}

/// Get playlist by ID with its membership list
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name, owner_id, created_at FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let songs = members(pool, id).await?;
    playlist_from_row(&row, songs).map(Some)
}

/// Get playlist with members resolved to songs.
///
/// Members follow insertion order; ids that no longer resolve are skipped.
pub async fn get_with_songs(
    pool: &SqlitePool,
    id: &PlaylistId,
) -> Result<Option<PlaylistWithSongs>> {
    let Some(playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query(&format!(
        r#"
        SELECT {SONG_COLUMNS}
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.position ASC
        "#
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    let tracks = rows.iter().map(song_from_row).collect::<Result<Vec<_>>>()?;

    Ok(Some(PlaylistWithSongs { playlist, tracks }))
}

/// Playlists owned by `owner`, oldest first, with their memberships
pub async fn get_user_playlists(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, owner_id, created_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    let member_rows = sqlx::query(
        r#"
        SELECT ps.playlist_id, ps.song_id
        FROM playlist_songs ps
        INNER JOIN playlists p ON p.id = ps.playlist_id
        WHERE p.owner_id = ?
        ORDER BY ps.playlist_id, ps.position ASC
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    let mut memberships: HashMap<PlaylistId, Vec<SongId>> = HashMap::new();
    for row in &member_rows {
        memberships
            .entry(row.get("playlist_id"))
            .or_default()
            .push(row.get("song_id"));
    }

    rows.iter()
        .map(|row| {
            let id: PlaylistId = row.get("id");
            let songs = dedup(memberships.remove(&id).unwrap_or_default());
            playlist_from_row(row, songs)
        })
        .collect()
}

/// Append a song to a playlist.
///
/// The membership key rejects a second insert of the same song, so two
/// concurrent adds cannot both succeed.
pub async fn add_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<Playlist> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(CoreError::not_found("Playlist", playlist_id.as_str()));
    }

    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM playlist_songs WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO playlist_songs (playlist_id, song_id, position, added_at) VALUES (?, ?, ?, ?)",
    )
    .bind(playlist_id)
    .bind(song_id)
    .bind(next_position)
    .bind(Utc::now().timestamp_millis())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        classify_write_error(
            e,
            || CoreError::conflict("Song already in playlist"),
            || CoreError::not_found("Song", song_id.as_str()),
        )
    })?;

    tx.commit().await?;

    get_by_id(pool, playlist_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Playlist", playlist_id.as_str()))
}

/// Remove a song from a playlist; returns whether it was a member
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a playlist; memberships go with it, songs stay
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
