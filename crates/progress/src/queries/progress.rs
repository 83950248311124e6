//! Listening progress database operations

use crate::DbPool;
use taledeck_core::{AppError, AudiobookId, Duration, ProgressRecord, Timestamp, UserId};

/// Creates or updates the progress record for a (user, audiobook) pair
///
/// Last write wins: a newer save simply overwrites whatever row is there.
pub async fn upsert_progress(pool: &DbPool, record: &ProgressRecord) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO listening_progress (
            user_id, audiobook_id, chapter_index, position_ms, is_completed, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, audiobook_id) DO UPDATE SET
            chapter_index = excluded.chapter_index,
            position_ms = excluded.position_ms,
            is_completed = excluded.is_completed,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(record.user_id.as_string())
    .bind(record.audiobook_id.as_string())
    .bind(record.chapter_index as i64)
    .bind(record.position.as_millis() as i64)
    .bind(record.is_completed as i64)
    .bind(record.updated_at.as_millis())
    .execute(pool)
    .await
    .map_err(|e| AppError::database("Failed to save listening progress", e))?;

    Ok(())
}

/// Gets the progress record for a (user, audiobook) pair, if any
pub async fn get_progress(
    pool: &DbPool,
    user_id: UserId,
    audiobook_id: AudiobookId,
) -> Result<Option<ProgressRecord>, AppError> {
    let row = sqlx::query(
        r#"
        SELECT user_id, audiobook_id, chapter_index, position_ms, is_completed, updated_at
        FROM listening_progress
        WHERE user_id = ? AND audiobook_id = ?
        "#,
    )
    .bind(user_id.as_string())
    .bind(audiobook_id.as_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::database("Failed to fetch listening progress", e))?;

    row.map(row_to_progress).transpose()
}

/// Lists a user's most recently touched titles, newest first
pub async fn list_recent_progress(
    pool: &DbPool,
    user_id: UserId,
    limit: u32,
) -> Result<Vec<ProgressRecord>, AppError> {
    let rows = sqlx::query(
        r#"
        SELECT user_id, audiobook_id, chapter_index, position_ms, is_completed, updated_at
        FROM listening_progress
        WHERE user_id = ?
        ORDER BY updated_at DESC
        LIMIT ?
        "#,
    )
    .bind(user_id.as_string())
    .bind(limit as i64)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::database("Failed to list recent progress", e))?;

    rows.into_iter().map(row_to_progress).collect()
}

/// Deletes the progress record for a (user, audiobook) pair
pub async fn delete_progress(
    pool: &DbPool,
    user_id: UserId,
    audiobook_id: AudiobookId,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM listening_progress WHERE user_id = ? AND audiobook_id = ?")
        .bind(user_id.as_string())
        .bind(audiobook_id.as_string())
        .execute(pool)
        .await
        .map_err(|e| AppError::database("Failed to delete listening progress", e))?;

    Ok(())
}

fn row_to_progress(row: sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, AppError> {
    use sqlx::Row;

    let user_id_str: String = row
        .try_get("user_id")
        .map_err(|e| AppError::database("Missing user ID", e))?;
    let user_id =
        UserId::from_string(&user_id_str).map_err(|e| AppError::database("Invalid user ID", e))?;

    let audiobook_id_str: String = row
        .try_get("audiobook_id")
        .map_err(|e| AppError::database("Missing audiobook ID", e))?;
    let audiobook_id = AudiobookId::from_string(&audiobook_id_str)
        .map_err(|e| AppError::database("Invalid audiobook ID", e))?;

    let chapter_index: i64 = row
        .try_get("chapter_index")
        .map_err(|e| AppError::database("Missing chapter index", e))?;
    let position_ms: i64 = row
        .try_get("position_ms")
        .map_err(|e| AppError::database("Missing position", e))?;
    let is_completed: i64 = row
        .try_get("is_completed")
        .map_err(|e| AppError::database("Missing is_completed", e))?;
    let updated_at: i64 = row
        .try_get("updated_at")
        .map_err(|e| AppError::database("Missing updated_at", e))?;

    Ok(ProgressRecord {
        user_id,
        audiobook_id,
        chapter_index: chapter_index.max(0) as u32,
        position: Duration::from_millis(position_ms.max(0) as u64),
        is_completed: is_completed != 0,
        updated_at: Timestamp::from_millis(updated_at),
    })
}
