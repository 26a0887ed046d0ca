use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{Id, User};

const COLUMNS: &str = "id, username, first_name, last_name, is_active";

pub fn insert(conn: &Connection, user: &User) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO users (id, username, first_name, last_name, is_active) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user.id, user.username, user.first_name, user.last_name, user.is_active],
    )
    .map_err(|e| unique_violation(e, "User", &user.username))?;
    Ok(())
}

pub fn update(conn: &Connection, user: &User) -> MapGroupResult<()> {
    conn.execute(
        "UPDATE users SET first_name = ?1, last_name = ?2, is_active = ?3 WHERE id = ?4",
        params![user.first_name, user.last_name, user.is_active, user.id],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<User>) -> MapGroupResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", COLUMNS),
            params![id],
            from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn find_by_username(conn: &Connection, username: &str) -> MapGroupResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE username = ?1", COLUMNS),
            params![username],
            from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn find_all(conn: &Connection) -> MapGroupResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY username", COLUMNS))?;
    let users = stmt
        .query_map([], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

fn from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        is_active: row.get(4)?,
    })
}
