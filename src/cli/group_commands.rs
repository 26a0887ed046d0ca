use serde_json::json;

use crate::cli::context::CliContext;
use crate::db::featured_repo;
use crate::error::MapGroupResult;
use crate::ops::*;
use crate::queries::*;
use crate::sharing::SqliteSharingRegistry;

pub fn create(ctx: &CliContext, name: &str, owner: &str, open: bool, blurb: &str) -> MapGroupResult<()> {
    let owner = ctx.find_user(owner)?;
    let (group, member) = group_ops::create_group(&ctx.conn, &SqliteSharingRegistry, owner.id, name, open, blurb)?;
    let permission_group = group_queries::permission_group_of(&ctx.conn, &group)?;

    ctx.emit(&json!({ "group": group, "owner_membership": member }), || {
        println!("Created {} ({})", group, group.id);
        println!("  URL: {}", group.absolute_url());
        println!("  Permission group: {}", permission_group.name);
    })
}

pub fn rename(ctx: &CliContext, reference: &str, name: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let group = group_ops::rename_group(&ctx.conn, group.id, name)?;
    let permission_group = group_queries::permission_group_of(&ctx.conn, &group)?;

    ctx.emit(&group, || {
        println!("Renamed to {} (slug: {})", group.name, group.slug);
        println!("  Permission group: {}", permission_group.name);
    })
}

pub fn set_blurb(ctx: &CliContext, reference: &str, blurb: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let group = group_ops::set_blurb(&ctx.conn, group.id, blurb)?;
    ctx.emit(&group, || println!("Updated blurb for {}", group))
}

pub fn set_open(ctx: &CliContext, reference: &str, open: bool) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let group = group_ops::set_open(&ctx.conn, group.id, open)?;
    ctx.emit(&group, || {
        if group.is_open {
            println!("{} is now open to everyone", group);
        } else {
            println!("{} is now invitation only", group);
        }
    })
}

pub fn delete(ctx: &CliContext, reference: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    group_ops::delete_group(&ctx.conn, group.id)?;
    println!("Deleted {}", group);
    Ok(())
}

pub fn list(ctx: &CliContext, featured: bool, not_featured: bool) -> MapGroupResult<()> {
    if featured {
        let ranked = featured_queries::featured_with_rank(&ctx.conn)?;
        return ctx.emit(&ranked, || {
            if ranked.is_empty() {
                println!("No featured groups.");
            }
            for (rank, group) in &ranked {
                println!("  #{} {} ({})", rank.rank, group.name, group.absolute_url());
            }
        });
    }

    let groups = if not_featured {
        featured_queries::not_featured(&ctx.conn)?
    } else {
        group_queries::all_groups(&ctx.conn)?
    };
    ctx.emit(&groups, || {
        if groups.is_empty() {
            println!("No groups yet. Use 'create <name> --owner <username>' to make one.");
        } else {
            println!("Groups ({}):", groups.len());
            for group in &groups {
                let access = if group.is_open { "open" } else { "invite only" };
                println!("  {} [{}] ({})", group.name, access, group.absolute_url());
            }
        }
    })
}

pub fn show(ctx: &CliContext, reference: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let members = group_queries::members_of(&ctx.conn, group.id)?;
    let permission_group = group_queries::permission_group_of(&ctx.conn, &group)?;

    let member_json: Vec<_> = members
        .iter()
        .map(|(m, u)| json!({ "membership": m, "display_name": m.display_name(u) }))
        .collect();
    ctx.emit(
        &json!({ "group": group, "permission_group": permission_group, "members": member_json }),
        || {
            println!();
            println!("Name: {}", group.name);
            println!("Slug: {}", group.slug);
            println!("Blurb: {}", if group.blurb.is_empty() { "(none)" } else { group.blurb.as_str() });
            println!("Open: {}", if group.is_open { "yes" } else { "no" });
            println!("Permission group: {}", permission_group.name);
            println!("Members ({}):", members.len());
            for (member, user) in &members {
                let role = if member.is_manager { " (manager)" } else { "" };
                println!("  {}{}", member.display_name(user), role);
            }
            println!();
        },
    )
}

pub fn feature(ctx: &CliContext, reference: &str, rank: i64) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let featured = if featured_repo::find_by_group(&ctx.conn, group.id)?.is_some() {
        featured_ops::set_rank(&ctx.conn, group.id, rank)?
    } else {
        featured_ops::feature_group(&ctx.conn, group.id, rank)?
    };
    ctx.emit(&featured, || println!("{} is featured at #{}", group, featured.rank))
}

pub fn unfeature(ctx: &CliContext, reference: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    featured_ops::unfeature_group(&ctx.conn, group.id)?;
    println!("{} is no longer featured", group);
    Ok(())
}
