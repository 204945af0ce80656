//! Pure authorization rules for workspace and channel operations.
//!
//! Decision functions only: callers fetch the membership rows, these
//! functions answer whether the intended action is permitted.

use crate::database::models::{ChannelMembership, WorkspaceRole};

/// Adding a user to a channel requires being a channel member holding the
/// admin flag. `None` means the requester is not a member at all.
pub fn can_add_member_to_channel(requester: Option<&ChannelMembership>) -> bool {
    requester.map_or(false, |membership| membership.is_admin)
}

/// Removing a user from a channel: an administering workspace rank or the
/// channel admin flag each suffice on their own.
pub fn can_remove_member_from_channel(
    workspace_role: Option<WorkspaceRole>,
    requester: Option<&ChannelMembership>,
) -> bool {
    workspace_role.map_or(false, WorkspaceRole::can_administer)
        || requester.map_or(false, |membership| membership.is_admin)
}

pub fn can_delete_channel(workspace_role: WorkspaceRole) -> bool {
    workspace_role.can_administer()
}

pub fn can_add_member_to_workspace(workspace_role: WorkspaceRole) -> bool {
    workspace_role.can_administer()
}

/// Whether the requester's rank allows removing workspace members. The
/// target must additionally not be the primary owner; that check lives in
/// the workspace service because it needs the workspace row.
pub fn can_remove_member_from_workspace(workspace_role: WorkspaceRole) -> bool {
    workspace_role.can_administer()
}
