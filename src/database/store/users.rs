use sqlx::PgExecutor;

use crate::database::models::User;

pub async fn insert(
    db: impl PgExecutor<'_>,
    name: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, password) VALUES ($1, $2)
         RETURNING id, name, password, created_at",
    )
    .bind(name)
    .bind(password_hash)
    .fetch_one(db)
    .await
}

pub async fn by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, password, created_at FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn by_name(db: impl PgExecutor<'_>, name: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, password, created_at FROM users WHERE name = $1")
        .bind(name)
        .fetch_optional(db)
        .await
}
