use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::map_group::MapGroup;
use super::user::User;

/// A user's membership card for one map group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGroupMember {
    pub id: Id<MapGroupMember>,
    pub user_id: Id<User>,
    pub map_group_id: Id<MapGroup>,
    pub date_joined: DateTime<Utc>,
    /// Managers may perform admin actions on the group.
    pub is_manager: bool,
    pub show_real_name: bool,
}

impl MapGroupMember {
    pub fn create(user_id: Id<User>, map_group_id: Id<MapGroup>, is_manager: bool) -> Self {
        Self {
            id: Id::generate(),
            user_id,
            map_group_id,
            date_joined: Utc::now(),
            is_manager,
            show_real_name: false,
        }
    }

    /// The user's name as it should appear in this group.
    pub fn display_name(&self, user: &User) -> String {
        if self.show_real_name {
            user.full_name()
        } else {
            user.short_name().to_string()
        }
    }
}
