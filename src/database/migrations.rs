use sqlx::PgPool;
use tracing::info;

use super::manager::StoreError;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS workspaces (
        id                BIGSERIAL PRIMARY KEY,
        name              TEXT NOT NULL UNIQUE,
        primary_owner_id  BIGINT NOT NULL REFERENCES users(id),
        created_at        TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS workspaces_and_users (
        workspace_id  BIGINT NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
        user_id       BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role_id       INTEGER NOT NULL,
        PRIMARY KEY (workspace_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS channels (
        id           BIGSERIAL PRIMARY KEY,
        name         TEXT NOT NULL,
        description  TEXT NOT NULL DEFAULT '',
        is_private   BOOLEAN NOT NULL DEFAULT FALSE,
        is_archive   BOOLEAN NOT NULL DEFAULT FALSE,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS channels_and_workspaces (
        channel_id    BIGINT NOT NULL REFERENCES channels(id) ON DELETE CASCADE,
        workspace_id  BIGINT NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
        PRIMARY KEY (channel_id, workspace_id)
    )",
    "CREATE TABLE IF NOT EXISTS channels_and_users (
        channel_id  BIGINT NOT NULL REFERENCES channels(id) ON DELETE CASCADE,
        user_id     BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        is_admin    BOOLEAN NOT NULL DEFAULT FALSE,
        PRIMARY KEY (channel_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS direct_messages (
        id            BIGSERIAL PRIMARY KEY,
        message       TEXT NOT NULL,
        send_user_id  BIGINT NOT NULL REFERENCES users(id),
        dm_line_id    BIGINT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS idx_workspaces_and_users_user
        ON workspaces_and_users (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_channels_and_users_user
        ON channels_and_users (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_direct_messages_line
        ON direct_messages (dm_line_id, created_at)",
];

/// Bring the schema up to date. Every statement is idempotent, so this
/// runs on each startup.
pub async fn run(pool: &PgPool) -> Result<(), StoreError> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database migrations complete");
    Ok(())
}
