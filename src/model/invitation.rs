use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::map_group::MapGroup;
use super::member::MapGroupMember;
use super::user::User;

pub const MESSAGE_MAX: usize = 512;
pub const INVITE_CODE_LEN: usize = 32;

/// A user's pending request to join an invitation-only group. Several may
/// accumulate for the same user and group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Id<Invitation>,
    pub user_id: Id<User>,
    pub map_group_id: Id<MapGroup>,
    pub message: String,
    pub date_created: DateTime<Utc>,
}

impl Invitation {
    pub fn create(user_id: Id<User>, map_group_id: Id<MapGroup>, message: String) -> Self {
        Self {
            id: Id::generate(),
            user_id,
            map_group_id,
            message,
            date_created: Utc::now(),
        }
    }
}

/// An invitation mailed to an address that may not belong to any user yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailInvitation {
    pub id: Id<EmailInvitation>,
    pub to_address: String,
    pub map_group_id: Id<MapGroup>,
    pub invite_code: String,
    pub invited_by: Id<MapGroupMember>,
    pub date_sent: DateTime<Utc>,
}

impl EmailInvitation {
    pub fn create(
        to_address: String,
        map_group_id: Id<MapGroup>,
        invite_code: String,
        invited_by: Id<MapGroupMember>,
    ) -> Self {
        Self {
            id: Id::generate(),
            to_address,
            map_group_id,
            invite_code,
            invited_by,
            date_sent: Utc::now(),
        }
    }
}
