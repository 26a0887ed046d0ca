pub mod ids;
pub mod user;
pub mod permission_group;
pub mod map_group;
pub mod member;
pub mod featured;
pub mod activity;
pub mod invitation;

// Re-exports for convenience
pub use ids::Id;
pub use user::User;
pub use permission_group::PermissionGroup;
pub use map_group::MapGroup;
pub use member::MapGroupMember;
pub use featured::FeaturedGroup;
pub use activity::ActivityLog;
pub use invitation::{EmailInvitation, Invitation};
