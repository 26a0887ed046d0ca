use rusqlite::Connection;

use crate::db::{activity_repo, user_repo};
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::activity::MESSAGE_MAX;
use crate::model::{ActivityLog, Id, MapGroup, User};
use crate::ops::group_ops::find_group;
use crate::validation;

/// Appends an entry to a group's activity log.
pub fn log_activity(
    conn: &Connection,
    group_id: Id<MapGroup>,
    message: &str,
    admin: bool,
    associated_user_id: Option<Id<User>>,
) -> MapGroupResult<ActivityLog> {
    let message = validation::non_blank(message, "message")?;
    validation::max_len(&message, MESSAGE_MAX, "message")?;
    let group = find_group(conn, group_id)?;
    if let Some(user_id) = associated_user_id {
        user_repo::find_by_id(conn, user_id)?.ok_or_else(|| MapGroupError::not_found("User", user_id))?;
    }

    let entry = ActivityLog::create(group.id, message, admin, associated_user_id);
    activity_repo::insert(conn, &entry)?;
    tracing::debug!(group_id = %group.id, admin, "logged activity");
    Ok(entry)
}
