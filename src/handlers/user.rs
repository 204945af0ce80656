use axum::{response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub name: String,
    pub password: String,
}

/// POST /api/user/sign_up - Register a new user
pub async fn sign_up(Json(input): Json<SignUpInput>) -> Result<impl IntoResponse, ApiError> {
    let service = UserService::new().await?;
    let user = service.sign_up(&input.name, &input.password).await?;
    Ok(Json(user))
}

/// POST /api/user/login - Verify credentials and issue a session token
pub async fn login(Json(input): Json<LoginInput>) -> Result<impl IntoResponse, ApiError> {
    let service = UserService::new().await?;
    let (user, token) = service.login(&input.name, &input.password).await?;
    Ok(Json(json!({ "token": token, "user": user })))
}
