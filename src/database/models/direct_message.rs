use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only direct message inside a conversation line.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DirectMessage {
    pub id: i64,
    pub message: String,
    pub send_user_id: i64,
    pub dm_line_id: i64,
    pub created_at: DateTime<Utc>,
}
