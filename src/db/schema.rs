use rusqlite::Connection;

use crate::error::MapGroupResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// Rows that only point at a group (memberships, ranks, activity, requests,
/// invites) are removed with it. A permission group cannot be deleted while
/// a map group still references it.
pub fn initialize(conn: &Connection) -> MapGroupResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS permission_groups (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE CHECK (length(name) <= 80)
        );

        CREATE TABLE IF NOT EXISTS permission_group_members (
            permission_group_id TEXT NOT NULL REFERENCES permission_groups(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (permission_group_id, user_id)
        );

        CREATE TABLE IF NOT EXISTS shared_permission_groups (
            permission_group_id TEXT PRIMARY KEY NOT NULL REFERENCES permission_groups(id) ON DELETE CASCADE,
            enabled_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS map_groups (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            slug TEXT NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            blurb TEXT NOT NULL DEFAULT '',
            permission_group_id TEXT NOT NULL UNIQUE REFERENCES permission_groups(id) ON DELETE RESTRICT,
            is_open INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS map_groups_slug ON map_groups(slug);

        CREATE TABLE IF NOT EXISTS map_group_members (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            map_group_id TEXT NOT NULL REFERENCES map_groups(id) ON DELETE CASCADE,
            date_joined TEXT NOT NULL,
            is_manager INTEGER NOT NULL DEFAULT 0,
            show_real_name INTEGER NOT NULL DEFAULT 0,
            UNIQUE (user_id, map_group_id)
        );

        CREATE TABLE IF NOT EXISTS featured_groups (
            id TEXT PRIMARY KEY NOT NULL,
            rank INTEGER NOT NULL UNIQUE CHECK (rank > 0),
            map_group_id TEXT NOT NULL UNIQUE REFERENCES map_groups(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS activity_logs (
            id TEXT PRIMARY KEY NOT NULL,
            map_group_id TEXT NOT NULL REFERENCES map_groups(id) ON DELETE CASCADE,
            message TEXT NOT NULL,
            date_created TEXT NOT NULL,
            admin INTEGER NOT NULL DEFAULT 0,
            associated_user_id TEXT REFERENCES users(id) ON DELETE SET NULL
        );

        CREATE TABLE IF NOT EXISTS invitations (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            map_group_id TEXT NOT NULL REFERENCES map_groups(id) ON DELETE CASCADE,
            message TEXT NOT NULL DEFAULT '',
            date_created TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS email_invitations (
            id TEXT PRIMARY KEY NOT NULL,
            to_address TEXT NOT NULL,
            map_group_id TEXT NOT NULL REFERENCES map_groups(id) ON DELETE CASCADE,
            invite_code TEXT NOT NULL UNIQUE,
            invited_by TEXT NOT NULL REFERENCES map_group_members(id) ON DELETE CASCADE,
            date_sent TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
