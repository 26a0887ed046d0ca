use rusqlite::Connection;

use crate::db::{group_repo, member_repo, permission_group_repo, user_repo};
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::map_group::{BLURB_MAX, NAME_MAX};
use crate::model::{Id, MapGroup, MapGroupMember, PermissionGroup, User};
use crate::sharing::SharingRegistry;
use crate::slug;
use crate::validation;

/// Creates a map group owned by `owner_id`, together with its permission
/// group and the owner's manager membership.
///
/// Everything happens in one transaction: a failure at any step leaves no
/// permission group, group or membership behind.
pub fn create_group(
    conn: &Connection,
    registry: &dyn SharingRegistry,
    owner_id: Id<User>,
    name: &str,
    is_open: bool,
    blurb: &str,
) -> MapGroupResult<(MapGroup, MapGroupMember)> {
    let name = validation::non_blank(name, "name")?;
    validation::max_len(&name, NAME_MAX, "name")?;
    let blurb = blurb.trim().to_string();
    validation::max_len(&blurb, BLURB_MAX, "blurb")?;

    user_repo::find_by_id(conn, owner_id)?
        .ok_or_else(|| MapGroupError::not_found("User", owner_id))?;

    let tx = conn.unchecked_transaction()?;

    let permission_group = PermissionGroup::create(slug::permission_group_name(&name));
    permission_group_repo::insert(&tx, &permission_group)?;
    registry.enable_sharing(&tx, &permission_group)?;

    let group = MapGroup::create(name, owner_id, blurb, permission_group.id, is_open);
    group_repo::insert(&tx, &group)?;

    permission_group_repo::add_user(&tx, permission_group.id, owner_id)?;

    let member = MapGroupMember::create(owner_id, group.id, true);
    member_repo::insert(&tx, &member)?;

    tx.commit()?;

    tracing::info!(
        group_id = %group.id,
        owner_id = %owner_id,
        permission_group = %permission_group.name,
        "created map group"
    );
    Ok((group, member))
}

/// Renames a group and its permission group. The permission group gets a
/// freshly randomized name.
pub fn rename_group(conn: &Connection, group_id: Id<MapGroup>, new_name: &str) -> MapGroupResult<MapGroup> {
    let new_name = validation::non_blank(new_name, "name")?;
    validation::max_len(&new_name, NAME_MAX, "name")?;

    let mut group = find_group(conn, group_id)?;

    let tx = conn.unchecked_transaction()?;

    group.set_name(new_name);
    group_repo::update(&tx, &group)?;

    let permission_group_name = slug::permission_group_name(&group.name);
    permission_group_repo::rename(&tx, group.permission_group_id, &permission_group_name)?;

    tx.commit()?;

    tracing::info!(
        group_id = %group.id,
        slug = %group.slug,
        permission_group = %permission_group_name,
        "renamed map group"
    );
    Ok(group)
}

pub fn set_blurb(conn: &Connection, group_id: Id<MapGroup>, blurb: &str) -> MapGroupResult<MapGroup> {
    let blurb = blurb.trim().to_string();
    validation::max_len(&blurb, BLURB_MAX, "blurb")?;

    let mut group = find_group(conn, group_id)?;
    group.blurb = blurb;
    group_repo::update(conn, &group)?;
    Ok(group)
}

pub fn set_open(conn: &Connection, group_id: Id<MapGroup>, is_open: bool) -> MapGroupResult<MapGroup> {
    let mut group = find_group(conn, group_id)?;
    group.is_open = is_open;
    group_repo::update(conn, &group)?;
    tracing::debug!(group_id = %group.id, is_open, "changed group openness");
    Ok(group)
}

/// Deletes a group and its permission group. Memberships, ranks, activity,
/// join requests and email invitations go with it.
pub fn delete_group(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<()> {
    let group = find_group(conn, group_id)?;

    let tx = conn.unchecked_transaction()?;
    group_repo::delete(&tx, group.id)?;
    permission_group_repo::delete(&tx, group.permission_group_id)?;
    tx.commit()?;

    tracing::info!(group_id = %group.id, "deleted map group");
    Ok(())
}

pub(crate) fn find_group(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<MapGroup> {
    group_repo::find_by_id(conn, group_id)?.ok_or_else(|| MapGroupError::not_found("MapGroup", group_id))
}
