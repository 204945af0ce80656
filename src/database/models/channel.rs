use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named sub-space within a workspace. Linked to its owning workspace
/// through the `channels_and_workspaces` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_private: bool,
    pub is_archive: bool,
}
