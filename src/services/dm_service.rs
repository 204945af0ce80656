use sqlx::PgPool;

use crate::database::models::DirectMessage;
use crate::database::store;
use crate::database::DatabaseManager;

use super::ServiceError;

pub struct DmService {
    pool: PgPool,
}

impl DmService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Append a message to a conversation line.
    pub async fn send(
        &self,
        message: &str,
        dm_line_id: i64,
        requester_id: i64,
    ) -> Result<DirectMessage, ServiceError> {
        if message.trim().is_empty() {
            return Err(ServiceError::InvalidInput("message is required".into()));
        }
        if dm_line_id <= 0 {
            return Err(ServiceError::InvalidInput("dm_line_id is required".into()));
        }

        Ok(store::direct_messages::insert(&self.pool, message, requester_id, dm_line_id).await?)
    }

    /// A conversation line's messages, newest first. An unknown line
    /// yields an empty list, not an error.
    pub async fn messages_for_line(
        &self,
        dm_line_id: i64,
    ) -> Result<Vec<DirectMessage>, ServiceError> {
        Ok(store::direct_messages::by_dm_line(&self.pool, dm_line_id).await?)
    }
}
