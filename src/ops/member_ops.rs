use rusqlite::Connection;

use crate::db::{activity_repo, member_repo, permission_group_repo, user_repo};
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::{ActivityLog, Id, Invitation, MapGroup, MapGroupMember, User};
use crate::ops::group_ops::find_group;
use crate::ops::invitation_ops;

/// What happened when a user asked to join a group.
#[derive(Debug, Clone)]
pub enum JoinOutcome {
    /// The group is open; the user is now a member.
    Joined(MapGroupMember),
    /// The group is invitation-only; a request was recorded for its managers.
    Requested(Invitation),
}

/// Adds `user_id` to the group and to the group's permission group.
pub fn add_member(
    conn: &Connection,
    group_id: Id<MapGroup>,
    user_id: Id<User>,
    is_manager: bool,
) -> MapGroupResult<MapGroupMember> {
    let group = find_group(conn, group_id)?;
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| MapGroupError::not_found("User", user_id))?;

    let tx = conn.unchecked_transaction()?;
    let member = MapGroupMember::create(user_id, group.id, is_manager);
    member_repo::insert(&tx, &member)?;
    permission_group_repo::add_user(&tx, group.permission_group_id, user_id)?;
    tx.commit()?;

    tracing::info!(group_id = %group.id, user_id = %user_id, is_manager, "added member");
    Ok(member)
}

/// Joins an open group directly, or files a join request for a closed one.
pub fn join_group(
    conn: &Connection,
    group_id: Id<MapGroup>,
    user_id: Id<User>,
    message: Option<&str>,
) -> MapGroupResult<JoinOutcome> {
    let group = find_group(conn, group_id)?;
    let user = user_repo::find_by_id(conn, user_id)?
        .ok_or_else(|| MapGroupError::not_found("User", user_id))?;
    if !user.is_active {
        return Err(MapGroupError::InactiveUser(user.username));
    }
    if member_repo::exists(conn, group.id, user.id)? {
        return Err(MapGroupError::AlreadyExists {
            entity_type: "MapGroupMember".into(),
            identifier: format!("{} in {}", user.id, group.id),
        });
    }

    if !group.is_open {
        let request = invitation_ops::request_to_join(conn, group.id, user.id, message.unwrap_or_default())?;
        return Ok(JoinOutcome::Requested(request));
    }

    let tx = conn.unchecked_transaction()?;
    let member = MapGroupMember::create(user.id, group.id, false);
    member_repo::insert(&tx, &member)?;
    permission_group_repo::add_user(&tx, group.permission_group_id, user.id)?;
    let entry = ActivityLog::create(
        group.id,
        format!("{} joined the group", user.short_name()),
        false,
        Some(user.id),
    );
    activity_repo::insert(&tx, &entry)?;
    tx.commit()?;

    tracing::info!(group_id = %group.id, user_id = %user.id, "joined open group");
    Ok(JoinOutcome::Joined(member))
}

/// Removes a member and revokes the permission group membership. The owner
/// cannot be removed.
pub fn remove_member(conn: &Connection, group_id: Id<MapGroup>, user_id: Id<User>) -> MapGroupResult<()> {
    let group = find_group(conn, group_id)?;
    if group.owner_id == user_id {
        return Err(MapGroupError::CannotRemoveOwner);
    }
    let member = member_repo::find(conn, group.id, user_id)?.ok_or_else(|| MapGroupError::NotAMember {
        user: user_id.to_string(),
        group: group.id.to_string(),
    })?;

    let tx = conn.unchecked_transaction()?;
    member_repo::delete(&tx, member.id)?;
    permission_group_repo::remove_user(&tx, group.permission_group_id, user_id)?;
    tx.commit()?;

    tracing::info!(group_id = %group.id, user_id = %user_id, "removed member");
    Ok(())
}

pub fn set_manager(
    conn: &Connection,
    member_id: Id<MapGroupMember>,
    is_manager: bool,
) -> MapGroupResult<MapGroupMember> {
    let mut member = find_member(conn, member_id)?;
    member.is_manager = is_manager;
    member_repo::update(conn, &member)?;
    Ok(member)
}

pub fn set_show_real_name(
    conn: &Connection,
    member_id: Id<MapGroupMember>,
    show_real_name: bool,
) -> MapGroupResult<MapGroupMember> {
    let mut member = find_member(conn, member_id)?;
    member.show_real_name = show_real_name;
    member_repo::update(conn, &member)?;
    Ok(member)
}

fn find_member(conn: &Connection, member_id: Id<MapGroupMember>) -> MapGroupResult<MapGroupMember> {
    member_repo::find_by_id(conn, member_id)?
        .ok_or_else(|| MapGroupError::not_found("MapGroupMember", member_id))
}
