use rusqlite::Connection;

use crate::db::invitation_repo;
use crate::error::MapGroupResult;
use crate::model::{EmailInvitation, Id, Invitation, MapGroup, User};

pub fn pending_requests(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Vec<Invitation>> {
    invitation_repo::find_requests_by_group(conn, group_id)
}

pub fn requests_by_user(conn: &Connection, user_id: Id<User>) -> MapGroupResult<Vec<Invitation>> {
    invitation_repo::find_requests_by_user(conn, user_id)
}

pub fn email_invites(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<Vec<EmailInvitation>> {
    invitation_repo::find_email_invites_by_group(conn, group_id)
}

pub fn find_invite_by_code(conn: &Connection, code: &str) -> MapGroupResult<Option<EmailInvitation>> {
    invitation_repo::find_email_invite_by_code(conn, code.trim())
}
