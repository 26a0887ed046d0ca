use chrono::Utc;

use crate::cli::context::CliContext;
use crate::error::MapGroupResult;
use crate::ops::*;
use crate::queries::*;

pub fn log(ctx: &CliContext, reference: &str, message: &str, admin: bool, username: Option<&str>) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let user_id = match username {
        Some(name) => Some(ctx.find_user(name)?.id),
        None => None,
    };
    let entry = activity_ops::log_activity(&ctx.conn, group.id, message, admin, user_id)?;
    ctx.emit(&entry, || println!("Logged to {}", group))
}

/// Recent entries filtered down to what `viewer` may see.
pub fn recent(ctx: &CliContext, reference: &str, days: i64, viewer: Option<&str>) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let viewer = match viewer {
        Some(name) => Some(ctx.find_user(name)?),
        None => None,
    };

    let visible: Vec<_> = activity_queries::visible_activity(&ctx.conn, group.id, viewer.as_ref())?
        .into_iter()
        .map(|e| e.id)
        .collect();
    let entries: Vec<_> = activity_queries::recent_activity(&ctx.conn, group.id, Utc::now(), days)?
        .into_iter()
        .filter(|e| visible.contains(&e.id))
        .collect();

    ctx.emit(&entries, || {
        if entries.is_empty() {
            println!("No activity in {} over the last {} days", group, days);
        }
        for entry in &entries {
            let marker = if entry.admin { " [admin]" } else { "" };
            println!("  {}{} {}", entry.date_created.format("%Y-%m-%d %H:%M"), marker, entry.message);
        }
    })
}
