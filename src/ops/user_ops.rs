use rusqlite::Connection;

use crate::db::user_repo;
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::{Id, User};
use crate::validation;

pub fn add_user(
    conn: &Connection,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> MapGroupResult<User> {
    let username = validation::non_blank(username, "username")?;
    let user = User::create(username, first_name.trim().into(), last_name.trim().into());
    user_repo::insert(conn, &user)?;
    tracing::debug!(user_id = %user.id, username = %user.username, "added user");
    Ok(user)
}

pub fn set_active(conn: &Connection, user_id: Id<User>, is_active: bool) -> MapGroupResult<User> {
    let mut user = user_repo::find_by_id(conn, user_id)?
        .ok_or_else(|| MapGroupError::not_found("User", user_id))?;

    user.is_active = is_active;
    user_repo::update(conn, &user)?;
    Ok(user)
}
