pub mod channel_service;
pub mod dm_service;
pub mod permissions;
pub mod user_service;
pub mod workspace_service;

pub use channel_service::ChannelService;
pub use dm_service::DmService;
pub use user_service::UserService;
pub use workspace_service::WorkspaceService;

use thiserror::Error;

use crate::database::{store, StoreError};

/// Service-level failure taxonomy. Every operation runs its precondition
/// checks in order and short-circuits on the first failure; raw store
/// error text never crosses this boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Store(StoreError::Sqlx(err))
    }
}

/// Map a unique-constraint violation onto Conflict with a stable message,
/// leaving other store errors untouched.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> ServiceError {
    if store::is_unique_violation(&err) {
        ServiceError::Conflict(message.to_string())
    } else {
        ServiceError::from(err)
    }
}
