use sqlx::{PgConnection, PgPool};

use crate::database::models::{Channel, ChannelMembership};
use crate::database::store;
use crate::database::DatabaseManager;

use super::{conflict_on_unique, permissions, ServiceError};

/// Reserved default channel created with every workspace. Its membership
/// cannot be altered through the remove-member operation.
pub const GENERAL_CHANNEL_NAME: &str = "general";

pub struct ChannelService {
    pool: PgPool,
}

impl ChannelService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Insert a channel, its workspace link and the creator's admin
    /// membership on the caller's transaction. Shared between channel
    /// creation and the default-channel step of workspace creation.
    pub(crate) async fn create_in_tx(
        conn: &mut PgConnection,
        name: &str,
        description: &str,
        is_private: bool,
        workspace_id: i64,
        creator_id: i64,
    ) -> Result<Channel, ServiceError> {
        let channel = store::channels::insert(&mut *conn, name, description, is_private).await?;
        store::channels::link_workspace(&mut *conn, channel.id, workspace_id).await?;
        store::channels::insert_member(&mut *conn, channel.id, creator_id, true).await?;
        Ok(channel)
    }

    /// Create a channel in a workspace. The creator becomes the channel's
    /// first member with the admin flag; channel, link and membership are
    /// written all-or-nothing.
    pub async fn create_channel(
        &self,
        name: &str,
        description: &str,
        is_private: Option<bool>,
        workspace_id: i64,
        requester_id: i64,
    ) -> Result<Channel, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("channel name is required".into()));
        }
        let is_private = is_private
            .ok_or_else(|| ServiceError::InvalidInput("private flag is required".into()))?;

        if store::workspaces::by_id(&self.pool, workspace_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("workspace not found".into()));
        }

        if store::channels::by_workspace_and_name(&self.pool, workspace_id, name)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "channel name already taken in workspace".into(),
            ));
        }

        if store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(
                "request user not found in workspace".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let channel =
            Self::create_in_tx(&mut tx, name, description, is_private, workspace_id, requester_id)
                .await?;
        tx.commit().await?;

        Ok(channel)
    }

    /// Add a workspace member to a channel. Only channel admins may do
    /// this; the new membership never carries the admin flag.
    pub async fn add_member(
        &self,
        channel_id: i64,
        user_id: i64,
        requester_id: i64,
        workspace_id: i64,
    ) -> Result<ChannelMembership, ServiceError> {
        if channel_id <= 0 || user_id <= 0 {
            return Err(ServiceError::InvalidInput(
                "channel_id and user_id are required".into(),
            ));
        }

        if store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(
                "request user not found in workspace".into(),
            ));
        }

        if store::workspaces::member(&self.pool, workspace_id, user_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("user not found in workspace".into()));
        }

        if !store::channels::is_linked(&self.pool, channel_id, workspace_id).await? {
            return Err(ServiceError::NotFound(
                "channel not found in workspace".into(),
            ));
        }

        if store::channels::member(&self.pool, channel_id, user_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict("user already in channel".into()));
        }

        let requester = store::channels::member(&self.pool, channel_id, requester_id).await?;
        if !permissions::can_add_member_to_channel(requester.as_ref()) {
            return Err(ServiceError::Forbidden(
                "no permission to add user to channel".into(),
            ));
        }

        store::channels::insert_member(&self.pool, channel_id, user_id, false)
            .await
            .map_err(|e| conflict_on_unique(e, "user already in channel"))
    }

    /// Remove a member from a channel. The reserved "general" channel and
    /// archived channels reject this operation outright.
    pub async fn remove_member(
        &self,
        channel_id: i64,
        workspace_id: i64,
        user_id: i64,
        requester_id: i64,
    ) -> Result<ChannelMembership, ServiceError> {
        if channel_id <= 0 || user_id <= 0 || workspace_id <= 0 {
            return Err(ServiceError::InvalidInput(
                "channel_id, workspace_id and user_id are required".into(),
            ));
        }

        let requester_workspace =
            store::workspaces::member(&self.pool, workspace_id, requester_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound("request user not found in workspace".into())
                })?;

        if store::workspaces::member(&self.pool, workspace_id, user_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("user not found in workspace".into()));
        }

        let channel = store::channels::by_id(&self.pool, channel_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("channel not found".into()))?;

        if !store::channels::is_linked(&self.pool, channel_id, workspace_id).await? {
            return Err(ServiceError::NotFound(
                "channel not found in workspace".into(),
            ));
        }

        if channel.name == GENERAL_CHANNEL_NAME {
            return Err(ServiceError::InvalidInput(
                "cannot remove users from the general channel".into(),
            ));
        }

        if channel.is_archive {
            return Err(ServiceError::InvalidInput(
                "cannot remove users from an archived channel".into(),
            ));
        }

        if store::channels::member(&self.pool, channel_id, user_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("user not found in channel".into()));
        }

        let requester_channel =
            store::channels::member(&self.pool, channel_id, requester_id).await?;
        if !permissions::can_remove_member_from_channel(
            requester_workspace.role(),
            requester_channel.as_ref(),
        ) {
            return Err(ServiceError::Forbidden(
                "no permission to remove user from channel".into(),
            ));
        }

        store::channels::delete_member(&self.pool, channel_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found in channel".into()))
    }

    /// Delete a channel: channel row, workspace link and all memberships
    /// go in one transaction.
    pub async fn delete_channel(
        &self,
        channel_id: i64,
        workspace_id: i64,
        requester_id: i64,
    ) -> Result<Channel, ServiceError> {
        if channel_id <= 0 || workspace_id <= 0 {
            return Err(ServiceError::InvalidInput(
                "channel_id and workspace_id are required".into(),
            ));
        }

        let requester = store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("request user not found in workspace".into())
            })?;

        if !requester.role().map_or(false, permissions::can_delete_channel) {
            return Err(ServiceError::Forbidden(
                "no permission to delete channel".into(),
            ));
        }

        if store::channels::by_id(&self.pool, channel_id).await?.is_none() {
            return Err(ServiceError::NotFound("channel not found".into()));
        }

        if !store::channels::is_linked(&self.pool, channel_id, workspace_id).await? {
            return Err(ServiceError::NotFound(
                "channel not found in workspace".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        store::channels::delete_members(&mut *tx, channel_id).await?;
        store::channels::unlink_workspace(&mut *tx, channel_id, workspace_id).await?;
        let channel = store::channels::delete(&mut *tx, channel_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("channel not found".into()))?;
        tx.commit().await?;

        Ok(channel)
    }

    /// Channels of a workspace the requester is a member of.
    pub async fn channels_for_user(
        &self,
        workspace_id: i64,
        requester_id: i64,
    ) -> Result<Vec<Channel>, ServiceError> {
        if store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(
                "request user not found in workspace".into(),
            ));
        }

        Ok(store::channels::for_member_in_workspace(&self.pool, workspace_id, requester_id).await?)
    }
}
