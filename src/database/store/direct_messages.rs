use sqlx::PgExecutor;

use crate::database::models::DirectMessage;

pub async fn insert(
    db: impl PgExecutor<'_>,
    message: &str,
    send_user_id: i64,
    dm_line_id: i64,
) -> Result<DirectMessage, sqlx::Error> {
    sqlx::query_as::<_, DirectMessage>(
        "INSERT INTO direct_messages (message, send_user_id, dm_line_id) VALUES ($1, $2, $3)
         RETURNING id, message, send_user_id, dm_line_id, created_at",
    )
    .bind(message)
    .bind(send_user_id)
    .bind(dm_line_id)
    .fetch_one(db)
    .await
}

/// A conversation line's messages, newest first. Id breaks ties between
/// messages that share a timestamp.
pub async fn by_dm_line(
    db: impl PgExecutor<'_>,
    dm_line_id: i64,
) -> Result<Vec<DirectMessage>, sqlx::Error> {
    sqlx::query_as::<_, DirectMessage>(
        "SELECT id, message, send_user_id, dm_line_id, created_at
         FROM direct_messages
         WHERE dm_line_id = $1
         ORDER BY created_at DESC, id DESC",
    )
    .bind(dm_line_id)
    .fetch_all(db)
    .await
}
