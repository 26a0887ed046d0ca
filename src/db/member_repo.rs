use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{Id, MapGroup, MapGroupMember, User};

const COLUMNS: &str = "id, user_id, map_group_id, date_joined, is_manager, show_real_name";

pub fn insert(conn: &Connection, member: &MapGroupMember) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO map_group_members (id, user_id, map_group_id, date_joined, is_manager, show_real_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            member.id,
            member.user_id,
            member.map_group_id,
            member.date_joined,
            member.is_manager,
            member.show_real_name,
        ],
    )
    .map_err(|e| {
        unique_violation(
            e,
            "MapGroupMember",
            format!("{} in {}", member.user_id, member.map_group_id),
        )
    })?;
    Ok(())
}

/// Writes the flags. `date_joined` is set once on insert.
pub fn update(conn: &Connection, member: &MapGroupMember) -> MapGroupResult<()> {
    conn.execute(
        "UPDATE map_group_members SET is_manager = ?1, show_real_name = ?2 WHERE id = ?3",
        params![member.is_manager, member.show_real_name, member.id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Id<MapGroupMember>) -> MapGroupResult<()> {
    conn.execute("DELETE FROM map_group_members WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<MapGroupMember>) -> MapGroupResult<Option<MapGroupMember>> {
    let member = conn
        .query_row(
            &format!("SELECT {} FROM map_group_members WHERE id = ?1", COLUMNS),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(member)
}

pub fn find(
    conn: &Connection,
    map_group_id: Id<MapGroup>,
    user_id: Id<User>,
) -> MapGroupResult<Option<MapGroupMember>> {
    let member = conn
        .query_row(
            &format!(
                "SELECT {} FROM map_group_members WHERE map_group_id = ?1 AND user_id = ?2",
                COLUMNS
            ),
            params![map_group_id, user_id],
            from_row,
        )
        .optional()?;
    Ok(member)
}

pub fn exists(conn: &Connection, map_group_id: Id<MapGroup>, user_id: Id<User>) -> MapGroupResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM map_group_members WHERE map_group_id = ?1 AND user_id = ?2",
            params![map_group_id, user_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    Ok(found)
}

/// Members of a group in the order they joined.
pub fn find_by_group(conn: &Connection, map_group_id: Id<MapGroup>) -> MapGroupResult<Vec<MapGroupMember>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM map_group_members WHERE map_group_id = ?1 ORDER BY date_joined",
        COLUMNS
    ))?;
    let members = stmt
        .query_map(params![map_group_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

fn from_row(row: &Row) -> rusqlite::Result<MapGroupMember> {
    Ok(MapGroupMember {
        id: row.get(0)?,
        user_id: row.get(1)?,
        map_group_id: row.get(2)?,
        date_joined: row.get(3)?,
        is_manager: row.get(4)?,
        show_real_name: row.get(5)?,
    })
}
