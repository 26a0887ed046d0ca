use rusqlite::{params, Connection, Row};

use crate::error::MapGroupResult;
use crate::model::{ActivityLog, Id, MapGroup};

pub fn insert(conn: &Connection, entry: &ActivityLog) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO activity_logs (id, map_group_id, message, date_created, admin, associated_user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.id,
            entry.map_group_id,
            entry.message,
            entry.date_created,
            entry.admin,
            entry.associated_user_id,
        ],
    )?;
    Ok(())
}

/// All entries for a group, newest first.
pub fn find_by_group(conn: &Connection, map_group_id: Id<MapGroup>) -> MapGroupResult<Vec<ActivityLog>> {
    let mut stmt = conn.prepare(
        "SELECT id, map_group_id, message, date_created, admin, associated_user_id
         FROM activity_logs WHERE map_group_id = ?1
         ORDER BY date_created DESC",
    )?;
    let entries = stmt
        .query_map(params![map_group_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

fn from_row(row: &Row) -> rusqlite::Result<ActivityLog> {
    Ok(ActivityLog {
        id: row.get(0)?,
        map_group_id: row.get(1)?,
        message: row.get(2)?,
        date_created: row.get(3)?,
        admin: row.get(4)?,
        associated_user_id: row.get(5)?,
    })
}
