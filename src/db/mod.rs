pub mod schema;
pub mod user_repo;
pub mod permission_group_repo;
pub mod group_repo;
pub mod member_repo;
pub mod featured_repo;
pub mod activity_repo;
pub mod invitation_repo;
