use sqlx::PgExecutor;

use crate::database::models::{MemberInfo, Workspace, WorkspaceMembership};

pub async fn insert(
    db: impl PgExecutor<'_>,
    name: &str,
    primary_owner_id: i64,
) -> Result<Workspace, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(
        "INSERT INTO workspaces (name, primary_owner_id) VALUES ($1, $2)
         RETURNING id, name, primary_owner_id",
    )
    .bind(name)
    .bind(primary_owner_id)
    .fetch_one(db)
    .await
}

pub async fn by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(
        "SELECT id, name, primary_owner_id FROM workspaces WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn rename(
    db: impl PgExecutor<'_>,
    id: i64,
    name: &str,
) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(
        "UPDATE workspaces SET name = $1 WHERE id = $2
         RETURNING id, name, primary_owner_id",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// All workspaces where the user holds a membership row.
pub async fn for_user(db: impl PgExecutor<'_>, user_id: i64) -> Result<Vec<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(
        "SELECT w.id, w.name, w.primary_owner_id
         FROM workspaces w
         JOIN workspaces_and_users wau ON wau.workspace_id = w.id
         WHERE wau.user_id = $1
         ORDER BY w.id",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn insert_member(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
    user_id: i64,
    role_id: i32,
) -> Result<WorkspaceMembership, sqlx::Error> {
    sqlx::query_as::<_, WorkspaceMembership>(
        "INSERT INTO workspaces_and_users (workspace_id, user_id, role_id) VALUES ($1, $2, $3)
         RETURNING workspace_id, user_id, role_id",
    )
    .bind(workspace_id)
    .bind(user_id)
    .bind(role_id)
    .fetch_one(db)
    .await
}

pub async fn member(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
    user_id: i64,
) -> Result<Option<WorkspaceMembership>, sqlx::Error> {
    sqlx::query_as::<_, WorkspaceMembership>(
        "SELECT workspace_id, user_id, role_id
         FROM workspaces_and_users
         WHERE workspace_id = $1 AND user_id = $2",
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Remove a membership row; the deleted row is returned so a missing one
/// surfaces as `None` from this single atomic statement.
pub async fn delete_member(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
    user_id: i64,
) -> Result<Option<WorkspaceMembership>, sqlx::Error> {
    sqlx::query_as::<_, WorkspaceMembership>(
        "DELETE FROM workspaces_and_users
         WHERE workspace_id = $1 AND user_id = $2
         RETURNING workspace_id, user_id, role_id",
    )
    .bind(workspace_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Members of a workspace joined with their display names.
pub async fn members(
    db: impl PgExecutor<'_>,
    workspace_id: i64,
) -> Result<Vec<MemberInfo>, sqlx::Error> {
    sqlx::query_as::<_, MemberInfo>(
        "SELECT u.id, u.name, wau.role_id
         FROM users u
         JOIN workspaces_and_users wau ON wau.user_id = u.id
         WHERE wau.workspace_id = $1
         ORDER BY wau.role_id, u.id",
    )
    .bind(workspace_id)
    .fetch_all(db)
    .await
}
