use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ChannelService;

#[derive(Debug, Deserialize)]
pub struct CreateChannelInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// A missing flag is rejected, never defaulted to public
    pub is_private: Option<bool>,
    pub workspace_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddUserInChannelInput {
    pub channel_id: i64,
    pub user_id: i64,
    pub workspace_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserFromChannelInput {
    pub channel_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChannelInput {
    pub channel_id: i64,
    pub workspace_id: i64,
}

/// POST /api/channel/create - Create a channel; the caller becomes its
/// first member with the admin flag
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<CreateChannelInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ChannelService::new().await?;
    let channel = service
        .create_channel(
            &input.name,
            &input.description,
            input.is_private,
            input.workspace_id,
            auth.user_id,
        )
        .await?;
    Ok(Json(channel))
}

/// POST /api/channel/add_user - Add a workspace member to a channel
pub async fn add_user(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<AddUserInChannelInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ChannelService::new().await?;
    let membership = service
        .add_member(input.channel_id, input.user_id, auth.user_id, input.workspace_id)
        .await?;
    Ok(Json(membership))
}

/// DELETE /api/channel/delete_user/:workspace_id - Remove a member from a
/// channel
pub async fn delete_user(
    Extension(auth): Extension<AuthUser>,
    Path(workspace_id): Path<i64>,
    Json(input): Json<DeleteUserFromChannelInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ChannelService::new().await?;
    let membership = service
        .remove_member(input.channel_id, workspace_id, input.user_id, auth.user_id)
        .await?;
    Ok(Json(membership))
}

/// DELETE /api/channel/delete - Delete a channel and its memberships
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<DeleteChannelInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ChannelService::new().await?;
    let channel = service
        .delete_channel(input.channel_id, input.workspace_id, auth.user_id)
        .await?;
    Ok(Json(channel))
}

/// GET /api/channel/get_by_user_and_workspace/:workspace_id - List the
/// caller's channels within a workspace
pub async fn get_by_user_and_workspace(
    Extension(auth): Extension<AuthUser>,
    Path(workspace_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = ChannelService::new().await?;
    let channels = service.channels_for_user(workspace_id, auth.user_id).await?;
    Ok(Json(channels))
}
