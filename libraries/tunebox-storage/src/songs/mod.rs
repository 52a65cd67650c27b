use crate::error::timestamp_from_millis;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tunebox_core::{CoreError, CreateSong, DetachReport, Result, Song, SongId, UpdateSong};

/// Column list shared by every query that materializes a `Song`
pub(crate) const SONG_COLUMNS: &str =
    "s.id AS id, s.title AS title, s.artist AS artist, s.album AS album, \
     s.duration AS duration, s.file_path AS file_path, s.album_art AS album_art, \
     s.owner_id AS owner_id, s.created_at AS created_at";

pub(crate) fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.get("id"),
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        duration: row.get("duration"),
        file_path: row.get("file_path"),
        album_art: row.get("album_art"),
        owner_id: row.get("owner_id"),
        created_at: timestamp_from_millis(row.get("created_at"))?,
    })
}

/// Insert a new song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    if song.title.trim().is_empty() {
        return Err(CoreError::invalid_argument("Song title is required"));
    }
    if song.artist.trim().is_empty() {
        return Err(CoreError::invalid_argument("Song artist is required"));
    }
    if song.file_path.trim().is_empty() {
        return Err(CoreError::invalid_argument("Song file reference is required"));
    }
    if song.owner_id.as_str().is_empty() {
        return Err(CoreError::invalid_argument("Song owner is required"));
    }

    let id = SongId::generate();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, artist, album, duration, file_path, album_art, owner_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(song.duration)
    .bind(&song.file_path)
    .bind(&song.album_art)
    .bind(&song.owner_id)
    .bind(now.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(Song {
        id,
        title: song.title,
        artist: song.artist,
        album: song.album,
        duration: song.duration,
        file_path: song.file_path,
        album_art: song.album_art,
        owner_id: song.owner_id,
        created_at: timestamp_from_millis(now.timestamp_millis())?,
    })
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Every song in upload order.
///
/// `rowid` breaks ties between songs created in the same millisecond.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {SONG_COLUMNS} FROM songs s ORDER BY s.created_at ASC, s.rowid ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Apply a partial update; absent fields keep their stored value
pub async fn update(pool: &SqlitePool, id: &SongId, update: UpdateSong) -> Result<Song> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = COALESCE(?, title),
            artist = COALESCE(?, artist)
        WHERE id = ?
        "#,
    )
    .bind(&update.title)
    .bind(&update.artist)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found("Song", id.as_str()));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Song", id.as_str()))
}

async fn detach_in(tx: &mut Transaction<'_, Sqlite>, id: &SongId) -> Result<DetachReport> {
    let memberships = sqlx::query("DELETE FROM playlist_songs WHERE song_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    let favorites = sqlx::query("DELETE FROM favorites WHERE song_id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(DetachReport {
        playlists_updated: memberships.rows_affected(),
        favorites_removed: favorites.rows_affected(),
    })
}

/// Remove the song from every playlist and drop every favorite of it
pub async fn detach(pool: &SqlitePool, id: &SongId) -> Result<DetachReport> {
    let mut tx = pool.begin().await?;
    let report = detach_in(&mut tx, id).await?;
    tx.commit().await?;
    Ok(report)
}

/// Delete the song record together with anything still referencing it
pub async fn delete(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let late = detach_in(&mut tx, id).await?;
    if late != DetachReport::default() {
        tracing::warn!(
            song_id = %id,
            playlists = late.playlists_updated,
            favorites = late.favorites_removed,
            "References to song appeared after detach; removed with the song"
        );
    }

    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}
