use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{EmailInvitation, Id, Invitation, MapGroup, User};

pub fn insert_request(conn: &Connection, request: &Invitation) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO invitations (id, user_id, map_group_id, message, date_created)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            request.id,
            request.user_id,
            request.map_group_id,
            request.message,
            request.date_created,
        ],
    )?;
    Ok(())
}

/// Join requests for a group, oldest first.
pub fn find_requests_by_group(conn: &Connection, map_group_id: Id<MapGroup>) -> MapGroupResult<Vec<Invitation>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, map_group_id, message, date_created
         FROM invitations WHERE map_group_id = ?1 ORDER BY date_created",
    )?;
    let requests = stmt
        .query_map(params![map_group_id], request_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(requests)
}

pub fn find_requests_by_user(conn: &Connection, user_id: Id<User>) -> MapGroupResult<Vec<Invitation>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, map_group_id, message, date_created
         FROM invitations WHERE user_id = ?1 ORDER BY date_created",
    )?;
    let requests = stmt
        .query_map(params![user_id], request_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(requests)
}

pub fn insert_email_invite(conn: &Connection, invite: &EmailInvitation) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO email_invitations (id, to_address, map_group_id, invite_code, invited_by, date_sent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            invite.id,
            invite.to_address,
            invite.map_group_id,
            invite.invite_code,
            invite.invited_by,
            invite.date_sent,
        ],
    )
    .map_err(|e| unique_violation(e, "EmailInvitation", &invite.invite_code))?;
    Ok(())
}

/// Email invitations for a group, oldest first.
pub fn find_email_invites_by_group(
    conn: &Connection,
    map_group_id: Id<MapGroup>,
) -> MapGroupResult<Vec<EmailInvitation>> {
    let mut stmt = conn.prepare(
        "SELECT id, to_address, map_group_id, invite_code, invited_by, date_sent
         FROM email_invitations WHERE map_group_id = ?1 ORDER BY date_sent",
    )?;
    let invites = stmt
        .query_map(params![map_group_id], invite_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(invites)
}

pub fn find_email_invite_by_code(conn: &Connection, code: &str) -> MapGroupResult<Option<EmailInvitation>> {
    let invite = conn
        .query_row(
            "SELECT id, to_address, map_group_id, invite_code, invited_by, date_sent
             FROM email_invitations WHERE invite_code = ?1",
            params![code],
            invite_from_row,
        )
        .optional()?;
    Ok(invite)
}

fn request_from_row(row: &Row) -> rusqlite::Result<Invitation> {
    Ok(Invitation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        map_group_id: row.get(2)?,
        message: row.get(3)?,
        date_created: row.get(4)?,
    })
}

fn invite_from_row(row: &Row) -> rusqlite::Result<EmailInvitation> {
    Ok(EmailInvitation {
        id: row.get(0)?,
        to_address: row.get(1)?,
        map_group_id: row.get(2)?,
        invite_code: row.get(3)?,
        invited_by: row.get(4)?,
        date_sent: row.get(5)?,
    })
}
