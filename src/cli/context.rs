use rusqlite::Connection;
use serde::Serialize;

use crate::db::user_repo;
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::*;
use crate::queries::*;

pub struct CliContext {
    pub conn: Connection,
    pub json: bool,
}

impl CliContext {
    pub fn new(conn: Connection, json: bool) -> Self {
        Self { conn, json }
    }

    /// Resolve a group by id, or by slug when exactly one group has it.
    pub fn find_group(&self, reference: &str) -> MapGroupResult<MapGroup> {
        let reference = reference.trim();
        if let Ok(id) = Id::<MapGroup>::parse(reference) {
            return group_queries::get_group(&self.conn, id)?
                .ok_or_else(|| MapGroupError::not_found("MapGroup", id));
        }

        let mut matches = group_queries::groups_with_slug(&self.conn, reference)?;
        match matches.len() {
            0 => Err(MapGroupError::not_found("MapGroup", reference)),
            1 => Ok(matches.remove(0)),
            n => Err(MapGroupError::Other(format!(
                "{} groups share the slug '{}'; use the group id",
                n, reference
            ))),
        }
    }

    pub fn find_user(&self, username: &str) -> MapGroupResult<User> {
        user_repo::find_by_username(&self.conn, username.trim())?
            .ok_or_else(|| MapGroupError::not_found("User", username))
    }

    /// Print as pretty JSON when `--json` was given, otherwise run `plain`.
    pub fn emit<T: Serialize>(&self, value: &T, plain: impl FnOnce()) -> MapGroupResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            plain();
        }
        Ok(())
    }
}
