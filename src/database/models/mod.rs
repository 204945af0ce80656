pub mod channel;
pub mod direct_message;
pub mod membership;
pub mod user;
pub mod workspace;

pub use channel::Channel;
pub use direct_message::DirectMessage;
pub use membership::{ChannelMembership, MemberInfo, WorkspaceMembership, WorkspaceRole};
pub use user::User;
pub use workspace::Workspace;
