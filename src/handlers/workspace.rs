use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::WorkspaceService;

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceInput {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddUserInWorkspaceInput {
    pub workspace_id: i64,
    pub user_id: i64,
    pub role_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserFromWorkspaceInput {
    pub workspace_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RenameWorkspaceInput {
    pub workspace_id: i64,
    pub name: String,
}

/// POST /api/workspace/create - Create a workspace; the caller becomes
/// primary owner and a default "general" channel is created alongside
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<CreateWorkspaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let workspace = service.create_workspace(&input.name, auth.user_id).await?;
    Ok(Json(workspace))
}

/// POST /api/workspace/add_user - Grant a user a role in a workspace
pub async fn add_user(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<AddUserInWorkspaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let membership = service
        .add_member(input.workspace_id, input.user_id, input.role_id, auth.user_id)
        .await?;
    Ok(Json(membership))
}

/// DELETE /api/workspace/delete_user - Remove a user from a workspace
pub async fn delete_user(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<DeleteUserFromWorkspaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let membership = service
        .remove_member(input.workspace_id, input.user_id, auth.user_id)
        .await?;
    Ok(Json(membership))
}

/// POST /api/workspace/rename - Rename a workspace
pub async fn rename(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<RenameWorkspaceInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let workspace = service
        .rename_workspace(input.workspace_id, &input.name, auth.user_id)
        .await?;
    Ok(Json(workspace))
}

/// GET /api/workspace/get_by_user - List the caller's workspaces
pub async fn get_by_user(
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let workspaces = service.workspaces_for_user(auth.user_id).await?;
    Ok(Json(workspaces))
}

/// GET /api/workspace/get_users/:workspace_id - List a workspace's members
pub async fn get_users(
    Extension(auth): Extension<AuthUser>,
    Path(workspace_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = WorkspaceService::new().await?;
    let members = service.list_members(workspace_id, auth.user_id).await?;
    Ok(Json(members))
}
