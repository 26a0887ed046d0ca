pub mod user_ops;
pub mod group_ops;
pub mod member_ops;
pub mod featured_ops;
pub mod activity_ops;
pub mod invitation_ops;
