use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::DmService;

#[derive(Debug, Deserialize)]
pub struct SendDmInput {
    pub message: String,
    pub dm_line_id: i64,
}

/// POST /api/dm/send - Append a message to a conversation line
pub async fn send(
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<SendDmInput>,
) -> Result<impl IntoResponse, ApiError> {
    let service = DmService::new().await?;
    let message = service
        .send(&input.message, input.dm_line_id, auth.user_id)
        .await?;
    Ok(Json(message))
}

/// GET /api/dm/get_by_dm_line/:dm_line_id - A conversation line's
/// messages, newest first
pub async fn get_by_dm_line(
    Extension(_auth): Extension<AuthUser>,
    Path(dm_line_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let service = DmService::new().await?;
    let messages = service.messages_for_line(dm_line_id).await?;
    Ok(Json(messages))
}
