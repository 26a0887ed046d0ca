use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use crate::db::{activity_repo, member_repo};
use crate::error::MapGroupResult;
use crate::model::{ActivityLog, Id, MapGroup, User};

/// Default width of the recent-activity window.
pub const RECENT_DAYS: i64 = 7;

// Keeps the cutoff inside chrono's representable range.
const MAX_DAYS: i64 = 1_000_000;

/// Every entry for the group, newest first.
pub fn all_activity(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Vec<ActivityLog>> {
    activity_repo::find_by_group(conn, group_id)
}

/// Entries created within `days` days before `as_of`, newest first. Entries
/// stamped after `as_of` are left out.
pub fn recent_activity(
    conn: &Connection,
    group_id: Id<MapGroup>,
    as_of: DateTime<Utc>,
    days: i64,
) -> MapGroupResult<Vec<ActivityLog>> {
    let cutoff = as_of - Duration::days(days.clamp(0, MAX_DAYS));
    Ok(activity_repo::find_by_group(conn, group_id)?
        .into_iter()
        .filter(|e| e.date_created >= cutoff && e.date_created <= as_of)
        .collect())
}

/// Entries `viewer` may read: managers see admin entries, everyone else
/// (including anonymous and inactive users) does not.
pub fn visible_activity(
    conn: &Connection,
    group_id: Id<MapGroup>,
    viewer: Option<&User>,
) -> MapGroupResult<Vec<ActivityLog>> {
    let is_manager = match viewer {
        Some(u) if u.is_active => member_repo::find(conn, group_id, u.id)?.is_some_and(|m| m.is_manager),
        _ => false,
    };

    Ok(activity_repo::find_by_group(conn, group_id)?
        .into_iter()
        .filter(|e| is_manager || !e.admin)
        .collect())
}
