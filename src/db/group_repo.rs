use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{Id, MapGroup, User};

const COLUMNS: &str = "g.id, g.name, g.slug, g.owner_id, g.blurb, g.permission_group_id, g.is_open";

pub fn insert(conn: &Connection, group: &MapGroup) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO map_groups (id, name, slug, owner_id, blurb, permission_group_id, is_open)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            group.id,
            group.name,
            group.slug,
            group.owner_id,
            group.blurb,
            group.permission_group_id,
            group.is_open,
        ],
    )
    .map_err(|e| unique_violation(e, "MapGroup", group.permission_group_id))?;
    Ok(())
}

/// Writes the mutable fields. Owner and permission group never change.
pub fn update(conn: &Connection, group: &MapGroup) -> MapGroupResult<()> {
    conn.execute(
        "UPDATE map_groups SET name = ?1, slug = ?2, blurb = ?3, is_open = ?4 WHERE id = ?5",
        params![group.name, group.slug, group.blurb, group.is_open, group.id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Id<MapGroup>) -> MapGroupResult<()> {
    conn.execute("DELETE FROM map_groups WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<MapGroup>) -> MapGroupResult<Option<MapGroup>> {
    let group = conn
        .query_row(
            &format!("SELECT {} FROM map_groups g WHERE g.id = ?1", COLUMNS),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(group)
}

pub fn find_all(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    query(conn, &format!("SELECT {} FROM map_groups g ORDER BY g.name", COLUMNS), params![])
}

pub fn find_by_slug(conn: &Connection, slug: &str) -> MapGroupResult<Vec<MapGroup>> {
    query(
        conn,
        &format!("SELECT {} FROM map_groups g WHERE g.slug = ?1 ORDER BY g.name", COLUMNS),
        params![slug],
    )
}

pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> MapGroupResult<Vec<MapGroup>> {
    query(
        conn,
        &format!("SELECT {} FROM map_groups g WHERE g.owner_id = ?1 ORDER BY g.name", COLUMNS),
        params![owner_id],
    )
}

pub fn find_by_member(conn: &Connection, user_id: Id<User>) -> MapGroupResult<Vec<MapGroup>> {
    query(
        conn,
        &format!(
            "SELECT {} FROM map_groups g
             JOIN map_group_members m ON m.map_group_id = g.id
             WHERE m.user_id = ?1 ORDER BY g.name",
            COLUMNS
        ),
        params![user_id],
    )
}

/// Groups holding a featured rank, lowest rank first.
pub fn find_featured(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    query(
        conn,
        &format!(
            "SELECT {} FROM map_groups g
             JOIN featured_groups f ON f.map_group_id = g.id
             ORDER BY f.rank",
            COLUMNS
        ),
        params![],
    )
}

pub fn find_not_featured(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    query(
        conn,
        &format!(
            "SELECT {} FROM map_groups g
             LEFT JOIN featured_groups f ON f.map_group_id = g.id
             WHERE f.id IS NULL ORDER BY g.name",
            COLUMNS
        ),
        params![],
    )
}

fn query(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> MapGroupResult<Vec<MapGroup>> {
    let mut stmt = conn.prepare(sql)?;
    let groups = stmt
        .query_map(params, from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(groups)
}

fn from_row(row: &Row) -> rusqlite::Result<MapGroup> {
    Ok(MapGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        owner_id: row.get(3)?,
        blurb: row.get(4)?,
        permission_group_id: row.get(5)?,
        is_open: row.get(6)?,
    })
}
