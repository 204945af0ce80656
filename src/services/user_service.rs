use sqlx::PgPool;
use tracing::error;

use crate::auth;
use crate::database::models::User;
use crate::database::store;
use crate::database::DatabaseManager;

use super::{conflict_on_unique, ServiceError};

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Register a new user. Only the Argon2id hash reaches the store.
    pub async fn sign_up(&self, name: &str, password: &str) -> Result<User, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("user name is required".into()));
        }
        if name.len() > 64 {
            return Err(ServiceError::InvalidInput(
                "user name must be at most 64 characters".into(),
            ));
        }
        if password.len() < 8 {
            return Err(ServiceError::InvalidInput(
                "password must be at least 8 characters".into(),
            ));
        }

        let hash = auth::hash_password(password).map_err(|e| {
            error!("password hashing failed: {}", e);
            ServiceError::Internal("could not process password".into())
        })?;

        store::users::insert(&self.pool, name, &hash)
            .await
            .map_err(|e| conflict_on_unique(e, "user name already taken"))
    }

    /// Verify credentials and issue a session token. Unknown name and bad
    /// password return the same message so neither case is distinguishable.
    pub async fn login(&self, name: &str, password: &str) -> Result<(User, String), ServiceError> {
        let user = store::users::by_name(&self.pool, name)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("invalid name or password".into()))?;

        if !auth::verify_password(password, &user.password) {
            return Err(ServiceError::Unauthorized("invalid name or password".into()));
        }

        let claims = auth::Claims::new(user.id, user.name.clone());
        let token = auth::generate_jwt(claims).map_err(|e| {
            error!("JWT generation failed: {}", e);
            ServiceError::Internal("could not issue session token".into())
        })?;

        Ok((user, token))
    }
}
