use rusqlite::Connection;

use crate::db::{invitation_repo, member_repo, user_repo};
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::invitation::{INVITE_CODE_LEN, MESSAGE_MAX};
use crate::model::{EmailInvitation, Id, Invitation, MapGroup, MapGroupMember, User};
use crate::ops::group_ops::find_group;
use crate::slug;
use crate::validation;

/// Records a request to join. Repeated requests are kept, not merged.
pub fn request_to_join(
    conn: &Connection,
    group_id: Id<MapGroup>,
    user_id: Id<User>,
    message: &str,
) -> MapGroupResult<Invitation> {
    let message = message.trim().to_string();
    validation::max_len(&message, MESSAGE_MAX, "message")?;
    let group = find_group(conn, group_id)?;
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| MapGroupError::not_found("User", user_id))?;

    let request = Invitation::create(user_id, group.id, message);
    invitation_repo::insert_request(conn, &request)?;
    tracing::info!(group_id = %group.id, user_id = %user_id, "recorded join request");
    Ok(request)
}

/// Records an email invitation with a fresh invite code. The inviter must
/// be a member of the group being invited to.
pub fn send_email_invite(
    conn: &Connection,
    group_id: Id<MapGroup>,
    invited_by: Id<MapGroupMember>,
    to_address: &str,
) -> MapGroupResult<EmailInvitation> {
    let to_address = validation::email(to_address)?;
    let group = find_group(conn, group_id)?;
    let inviter = member_repo::find_by_id(conn, invited_by)?
        .ok_or_else(|| MapGroupError::not_found("MapGroupMember", invited_by))?;
    if inviter.map_group_id != group.id {
        return Err(MapGroupError::NotAMember {
            user: inviter.user_id.to_string(),
            group: group.id.to_string(),
        });
    }

    let invite = EmailInvitation::create(
        to_address,
        group.id,
        slug::random_string(INVITE_CODE_LEN),
        inviter.id,
    );
    invitation_repo::insert_email_invite(conn, &invite)?;
    tracing::info!(group_id = %group.id, invited_by = %inviter.id, "sent email invitation");
    Ok(invite)
}
