use sqlx::PgExecutor;

use crate::database::models::{Channel, ChannelMembership};

pub async fn insert(
    db: impl PgExecutor<'_>,
    name: &str,
    description: &str,
    is_private: bool,
) -> Result<Channel, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        "INSERT INTO channels (name, description, is_private) VALUES ($1, $2, $3)
         RETURNING id, name, description, is_private, is_archive",
    )
    .bind(name)
    .bind(description)
    .bind(is_private)
    .fetch_one(db)
    .await
}

pub async fn by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        "SELECT id, name, description, is_private, is_archive FROM channels WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Look a channel up by name within a single workspace. Channel names are
/// only unique per workspace, so the workspace link is part of the key.
pub async fn by_workspace_and_name(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
    name: &str,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        "SELECT c.id, c.name, c.description, c.is_private, c.is_archive
         FROM channels c
         JOIN channels_and_workspaces caw ON caw.channel_id = c.id
         WHERE caw.workspace_id = $1 AND c.name = $2",
    )
    .bind(workspace_id)
    .bind(name)
    .fetch_optional(db)
    .await
}

pub async fn link_workspace(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    workspace_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO channels_and_workspaces (channel_id, workspace_id) VALUES ($1, $2)")
        .bind(channel_id)
        .bind(workspace_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn is_linked(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    workspace_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM channels_and_workspaces WHERE channel_id = $1 AND workspace_id = $2",
    )
    .bind(channel_id)
    .bind(workspace_id)
    .fetch_one(db)
    .await?;

    Ok(count.0 > 0)
}

pub async fn unlink_workspace(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    workspace_id: i64,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM channels_and_workspaces WHERE channel_id = $1 AND workspace_id = $2")
            .bind(channel_id)
            .bind(workspace_id)
            .execute(db)
            .await?;

    Ok(result.rows_affected())
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        "DELETE FROM channels WHERE id = $1
         RETURNING id, name, description, is_private, is_archive",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_member(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    user_id: i64,
    is_admin: bool,
) -> Result<ChannelMembership, sqlx::Error> {
    sqlx::query_as::<_, ChannelMembership>(
        "INSERT INTO channels_and_users (channel_id, user_id, is_admin) VALUES ($1, $2, $3)
         RETURNING channel_id, user_id, is_admin",
    )
    .bind(channel_id)
    .bind(user_id)
    .bind(is_admin)
    .fetch_one(db)
    .await
}

pub async fn member(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    user_id: i64,
) -> Result<Option<ChannelMembership>, sqlx::Error> {
    sqlx::query_as::<_, ChannelMembership>(
        "SELECT channel_id, user_id, is_admin
         FROM channels_and_users
         WHERE channel_id = $1 AND user_id = $2",
    )
    .bind(channel_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn delete_member(
    db: impl PgExecutor<'_>,
    channel_id: i64,
    user_id: i64,
) -> Result<Option<ChannelMembership>, sqlx::Error> {
    sqlx::query_as::<_, ChannelMembership>(
        "DELETE FROM channels_and_users
         WHERE channel_id = $1 AND user_id = $2
         RETURNING channel_id, user_id, is_admin",
    )
    .bind(channel_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn delete_members(db: impl PgExecutor<'_>, channel_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM channels_and_users WHERE channel_id = $1")
        .bind(channel_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

/// Channels of a workspace where the given user holds a channel membership.
pub async fn for_member_in_workspace(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
    user_id: i64,
) -> Result<Vec<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        "SELECT c.id, c.name, c.description, c.is_private, c.is_archive
         FROM channels c
         JOIN channels_and_workspaces caw ON caw.channel_id = c.id
         JOIN channels_and_users cau ON cau.channel_id = c.id
         WHERE caw.workspace_id = $1 AND cau.user_id = $2
         ORDER BY c.id",
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_all(db)
    .await
}
