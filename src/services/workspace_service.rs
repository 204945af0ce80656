use sqlx::PgPool;

use crate::database::models::{
    MemberInfo, Workspace, WorkspaceMembership, WorkspaceRole,
};
use crate::database::store;
use crate::database::DatabaseManager;

use super::channel_service::{ChannelService, GENERAL_CHANNEL_NAME};
use super::{conflict_on_unique, permissions, ServiceError};

pub struct WorkspaceService {
    pool: PgPool,
}

impl WorkspaceService {
    pub async fn new() -> Result<Self, ServiceError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Create a workspace. The requester becomes primary owner and the
    /// default "general" channel is created alongside, all in a single
    /// transaction so a failure leaves nothing behind.
    pub async fn create_workspace(
        &self,
        name: &str,
        requester_id: i64,
    ) -> Result<Workspace, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "workspace name is required".into(),
            ));
        }
        if requester_id <= 0 {
            return Err(ServiceError::InvalidInput(
                "request user id is required".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let workspace = store::workspaces::insert(&mut *tx, name, requester_id)
            .await
            .map_err(|e| conflict_on_unique(e, "workspace name already taken"))?;

        store::workspaces::insert_member(
            &mut *tx,
            workspace.id,
            requester_id,
            WorkspaceRole::PrimaryOwner.id(),
        )
        .await?;

        ChannelService::create_in_tx(
            &mut tx,
            GENERAL_CHANNEL_NAME,
            "",
            false,
            workspace.id,
            requester_id,
        )
        .await?;

        tx.commit().await?;

        Ok(workspace)
    }

    /// Grant a user membership in a workspace. The primary-owner role can
    /// never be granted this way.
    pub async fn add_member(
        &self,
        workspace_id: i64,
        user_id: i64,
        role_id: i32,
        requester_id: i64,
    ) -> Result<WorkspaceMembership, ServiceError> {
        let role = WorkspaceRole::assignable(role_id).ok_or_else(|| {
            ServiceError::InvalidInput("role cannot be assigned through this operation".into())
        })?;

        if store::workspaces::by_id(&self.pool, workspace_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound("workspace not found".into()));
        }

        if store::users::by_id(&self.pool, user_id).await?.is_none() {
            return Err(ServiceError::NotFound("user not found".into()));
        }

        let requester_role = store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .and_then(|m| m.role());
        if !requester_role.map_or(false, permissions::can_add_member_to_workspace) {
            return Err(ServiceError::Forbidden(
                "no permission to add user to workspace".into(),
            ));
        }

        store::workspaces::insert_member(&self.pool, workspace_id, user_id, role.id())
            .await
            .map_err(|e| conflict_on_unique(e, "user already in workspace"))
    }

    /// Remove a member. The primary owner cannot be removed while they
    /// remain primary owner.
    pub async fn remove_member(
        &self,
        workspace_id: i64,
        user_id: i64,
        requester_id: i64,
    ) -> Result<WorkspaceMembership, ServiceError> {
        if workspace_id <= 0 || user_id <= 0 {
            return Err(ServiceError::InvalidInput(
                "workspace_id and user_id are required".into(),
            ));
        }

        let requester = store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("request user not found in workspace".into())
            })?;

        if !requester
            .role()
            .map_or(false, permissions::can_remove_member_from_workspace)
        {
            return Err(ServiceError::Forbidden(
                "no permission to remove user from workspace".into(),
            ));
        }

        let workspace = store::workspaces::by_id(&self.pool, workspace_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("workspace not found".into()))?;

        if workspace.primary_owner_id == user_id {
            return Err(ServiceError::InvalidInput(
                "cannot remove the primary owner from the workspace".into(),
            ));
        }

        store::workspaces::delete_member(&self.pool, workspace_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("user not found in workspace".into()))
    }

    /// Rename a workspace. Gated at administering ranks like the other
    /// workspace-level mutations.
    pub async fn rename_workspace(
        &self,
        workspace_id: i64,
        new_name: &str,
        requester_id: i64,
    ) -> Result<Workspace, ServiceError> {
        if workspace_id <= 0 || new_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "workspace_id and name are required".into(),
            ));
        }

        let requester = store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("request user not found in workspace".into())
            })?;

        if !requester.role().map_or(false, WorkspaceRole::can_administer) {
            return Err(ServiceError::Forbidden(
                "no permission to rename workspace".into(),
            ));
        }

        store::workspaces::rename(&self.pool, workspace_id, new_name)
            .await
            .map_err(|e| conflict_on_unique(e, "workspace name already taken"))?
            .ok_or_else(|| ServiceError::NotFound("workspace not found".into()))
    }

    /// All workspaces the user belongs to; an empty list is not an error.
    pub async fn workspaces_for_user(&self, user_id: i64) -> Result<Vec<Workspace>, ServiceError> {
        Ok(store::workspaces::for_user(&self.pool, user_id).await?)
    }

    /// Member listing is itself membership-gated.
    pub async fn list_members(
        &self,
        workspace_id: i64,
        requester_id: i64,
    ) -> Result<Vec<MemberInfo>, ServiceError> {
        if store::workspaces::member(&self.pool, workspace_id, requester_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(
                "request user not found in workspace".into(),
            ));
        }

        Ok(store::workspaces::members(&self.pool, workspace_id).await?)
    }
}
