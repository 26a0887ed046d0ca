use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{Id, PermissionGroup, User};

pub fn insert(conn: &Connection, group: &PermissionGroup) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO permission_groups (id, name) VALUES (?1, ?2)",
        params![group.id, group.name],
    )
    .map_err(|e| unique_violation(e, "PermissionGroup", &group.name))?;
    Ok(())
}

pub fn rename(conn: &Connection, id: Id<PermissionGroup>, name: &str) -> MapGroupResult<()> {
    conn.execute(
        "UPDATE permission_groups SET name = ?1 WHERE id = ?2",
        params![name, id],
    )
    .map_err(|e| unique_violation(e, "PermissionGroup", name))?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Id<PermissionGroup>) -> MapGroupResult<()> {
    conn.execute("DELETE FROM permission_groups WHERE id = ?1", params![id])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<PermissionGroup>) -> MapGroupResult<Option<PermissionGroup>> {
    let group = conn
        .query_row(
            "SELECT id, name FROM permission_groups WHERE id = ?1",
            params![id],
            |row| {
                Ok(PermissionGroup {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(group)
}

pub fn add_user(conn: &Connection, id: Id<PermissionGroup>, user_id: Id<User>) -> MapGroupResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO permission_group_members (permission_group_id, user_id) VALUES (?1, ?2)",
        params![id, user_id],
    )?;
    Ok(())
}

pub fn remove_user(conn: &Connection, id: Id<PermissionGroup>, user_id: Id<User>) -> MapGroupResult<()> {
    conn.execute(
        "DELETE FROM permission_group_members WHERE permission_group_id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(())
}

pub fn find_user_ids(conn: &Connection, id: Id<PermissionGroup>) -> MapGroupResult<Vec<Id<User>>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM permission_group_members WHERE permission_group_id = ?1",
    )?;
    let ids: Vec<Id<User>> = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

pub fn mark_shared(conn: &Connection, id: Id<PermissionGroup>) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO shared_permission_groups (permission_group_id, enabled_at) VALUES (?1, ?2)",
        params![id, Utc::now()],
    )
    .map_err(|e| unique_violation(e, "SharedPermissionGroup", id))?;
    Ok(())
}

pub fn is_shared(conn: &Connection, id: Id<PermissionGroup>) -> MapGroupResult<bool> {
    let shared = conn
        .query_row(
            "SELECT 1 FROM shared_permission_groups WHERE permission_group_id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    Ok(shared)
}
