use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::map_group::MapGroup;
use super::user::User;

pub const MESSAGE_MAX: usize = 256;

/// Something that happened in a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Id<ActivityLog>,
    pub map_group_id: Id<MapGroup>,
    pub message: String,
    pub date_created: DateTime<Utc>,
    /// Only managers may see admin entries.
    pub admin: bool,
    pub associated_user_id: Option<Id<User>>,
}

impl ActivityLog {
    pub fn create(
        map_group_id: Id<MapGroup>,
        message: String,
        admin: bool,
        associated_user_id: Option<Id<User>>,
    ) -> Self {
        Self {
            id: Id::generate(),
            map_group_id,
            message,
            date_created: Utc::now(),
            admin,
            associated_user_id,
        }
    }
}
