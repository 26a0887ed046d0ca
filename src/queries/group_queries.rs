use rusqlite::Connection;

use crate::db::{group_repo, member_repo, permission_group_repo, user_repo};
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::{Id, MapGroup, MapGroupMember, PermissionGroup, User};

pub fn get_group(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Option<MapGroup>> {
    group_repo::find_by_id(conn, group_id)
}

pub fn all_groups(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_all(conn)
}

/// Slugs are not unique, so this can return several groups.
pub fn groups_with_slug(conn: &Connection, slug: &str) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_by_slug(conn, slug)
}

pub fn groups_owned_by(conn: &Connection, user_id: Id<User>) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_by_owner(conn, user_id)
}

pub fn groups_for_user(conn: &Connection, user_id: Id<User>) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_by_member(conn, user_id)
}

/// Whether `user` belongs to the group. Anonymous (`None`) and inactive users
/// never do, whatever rows exist.
pub fn has_member(conn: &Connection, group: &MapGroup, user: Option<&User>) -> MapGroupResult<bool> {
    match user {
        Some(u) if u.is_active => member_repo::exists(conn, group.id, u.id),
        _ => Ok(false),
    }
}

/// The user's membership card, with the same anonymous/inactive rule as
/// [`has_member`].
pub fn get_member(
    conn: &Connection,
    group: &MapGroup,
    user: Option<&User>,
) -> MapGroupResult<Option<MapGroupMember>> {
    match user {
        Some(u) if u.is_active => member_repo::find(conn, group.id, u.id),
        _ => Ok(None),
    }
}

/// Members paired with their accounts, in join order.
pub fn members_of(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Vec<(MapGroupMember, User)>> {
    let members = member_repo::find_by_group(conn, group_id)?;
    let mut results = Vec::with_capacity(members.len());

    for member in members {
        if let Some(user) = user_repo::find_by_id(conn, member.user_id)? {
            results.push((member, user));
        }
    }

    Ok(results)
}

pub fn managers_of(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Vec<(MapGroupMember, User)>> {
    Ok(members_of(conn, group_id)?
        .into_iter()
        .filter(|(m, _)| m.is_manager)
        .collect())
}

pub fn permission_group_of(conn: &Connection, group: &MapGroup) -> MapGroupResult<PermissionGroup> {
    permission_group_repo::find_by_id(conn, group.permission_group_id)?
        .ok_or_else(|| MapGroupError::not_found("PermissionGroup", group.permission_group_id))
}

/// Users holding the group's permission group.
pub fn permission_holders(conn: &Connection, group: &MapGroup) -> MapGroupResult<Vec<Id<User>>> {
    permission_group_repo::find_user_ids(conn, group.permission_group_id)
}
