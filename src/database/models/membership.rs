use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Workspace role ranks, highest administrative power first.
///
/// Replaces the raw role ids 1-4 with a named hierarchy. The numeric ids
/// are still what the store persists, so `from_id`/`id` convert at the
/// service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceRole {
    PrimaryOwner,
    Admin,
    Moderator,
    Member,
}

impl WorkspaceRole {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::PrimaryOwner),
            2 => Some(Self::Admin),
            3 => Some(Self::Moderator),
            4 => Some(Self::Member),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::PrimaryOwner => 1,
            Self::Admin => 2,
            Self::Moderator => 3,
            Self::Member => 4,
        }
    }

    /// Ranks allowed to administer a workspace: add or remove members,
    /// rename the workspace, delete channels.
    pub fn can_administer(self) -> bool {
        matches!(self, Self::PrimaryOwner | Self::Admin | Self::Moderator)
    }

    /// Roles grantable through the add-member operation. PrimaryOwner is
    /// reserved for workspace creation and never assignable.
    pub fn assignable(id: i32) -> Option<Self> {
        Self::from_id(id).filter(|role| *role != Self::PrimaryOwner)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkspaceMembership {
    pub workspace_id: i64,
    pub user_id: i64,
    pub role_id: i32,
}

impl WorkspaceMembership {
    pub fn role(&self) -> Option<WorkspaceRole> {
        WorkspaceRole::from_id(self.role_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChannelMembership {
    pub channel_id: i64,
    pub user_id: i64,
    pub is_admin: bool,
}

/// A workspace member joined with their display name, as returned by the
/// member-listing operation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MemberInfo {
    pub id: i64,
    pub name: String,
    pub role_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_role_ids_both_ways() {
        for id in 1..=4 {
            let role = WorkspaceRole::from_id(id).unwrap();
            assert_eq!(role.id(), id);
        }
        assert_eq!(WorkspaceRole::from_id(0), None);
        assert_eq!(WorkspaceRole::from_id(5), None);
    }

    #[test]
    fn orders_roles_by_power() {
        assert!(WorkspaceRole::PrimaryOwner < WorkspaceRole::Admin);
        assert!(WorkspaceRole::Admin < WorkspaceRole::Moderator);
        assert!(WorkspaceRole::Moderator < WorkspaceRole::Member);
    }

    #[test]
    fn administering_ranks_exclude_plain_members() {
        assert!(WorkspaceRole::PrimaryOwner.can_administer());
        assert!(WorkspaceRole::Admin.can_administer());
        assert!(WorkspaceRole::Moderator.can_administer());
        assert!(!WorkspaceRole::Member.can_administer());
    }

    #[test]
    fn primary_owner_is_never_assignable() {
        assert_eq!(WorkspaceRole::assignable(1), None);
        assert_eq!(WorkspaceRole::assignable(2), Some(WorkspaceRole::Admin));
        assert_eq!(WorkspaceRole::assignable(3), Some(WorkspaceRole::Moderator));
        assert_eq!(WorkspaceRole::assignable(4), Some(WorkspaceRole::Member));
        assert_eq!(WorkspaceRole::assignable(42), None);
    }
}
