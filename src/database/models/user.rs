use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Argon2id PHC string. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}
