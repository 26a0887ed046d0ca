pub mod error;
pub mod validation;
pub mod slug;
pub mod model;
pub mod db;
pub mod sharing;
pub mod ops;
pub mod queries;
pub mod cli;
