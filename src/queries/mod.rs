pub mod group_queries;
pub mod featured_queries;
pub mod activity_queries;
pub mod invitation_queries;
