use crate::cli::context::CliContext;
use crate::db::user_repo;
use crate::error::MapGroupResult;
use crate::ops::member_ops::JoinOutcome;
use crate::ops::*;
use crate::queries::*;

pub fn add_user(ctx: &CliContext, username: &str, first: &str, last: &str) -> MapGroupResult<()> {
    let user = user_ops::add_user(&ctx.conn, username, first, last)?;
    ctx.emit(&user, || println!("Added user {} ({})", user.username, user.id))
}

pub fn deactivate_user(ctx: &CliContext, username: &str) -> MapGroupResult<()> {
    let user = ctx.find_user(username)?;
    let user = user_ops::set_active(&ctx.conn, user.id, false)?;
    ctx.emit(&user, || println!("Deactivated {}", user.username))
}

pub fn join(ctx: &CliContext, reference: &str, username: &str, message: Option<&str>) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let user = ctx.find_user(username)?;

    match member_ops::join_group(&ctx.conn, group.id, user.id, message)? {
        JoinOutcome::Joined(member) => {
            ctx.emit(&member, || println!("{} joined {}", user.username, group))
        }
        JoinOutcome::Requested(request) => ctx.emit(&request, || {
            println!("{} is invitation only; request sent to its managers", group)
        }),
    }
}

pub fn add(ctx: &CliContext, reference: &str, username: &str, manager: bool) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let user = ctx.find_user(username)?;
    let member = member_ops::add_member(&ctx.conn, group.id, user.id, manager)?;
    ctx.emit(&member, || println!("Added {} to {}", user.username, group))
}

pub fn remove(ctx: &CliContext, reference: &str, username: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let user = ctx.find_user(username)?;
    member_ops::remove_member(&ctx.conn, group.id, user.id)?;
    println!("Removed {} from {}", user.username, group);
    Ok(())
}

pub fn requests(ctx: &CliContext, reference: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let requests = invitation_queries::pending_requests(&ctx.conn, group.id)?;
    let mut requesters = Vec::with_capacity(requests.len());
    for request in &requests {
        let who = user_repo::find_by_id(&ctx.conn, request.user_id)?
            .map(|u| u.username)
            .unwrap_or_else(|| request.user_id.to_string());
        requesters.push(who);
    }

    ctx.emit(&requests, || {
        if requests.is_empty() {
            println!("No pending requests for {}", group);
        }
        for (request, who) in requests.iter().zip(&requesters) {
            let when = request.date_created.format("%Y-%m-%d");
            if request.message.is_empty() {
                println!("  {} {}", when, who);
            } else {
                println!("  {} {}: {}", when, who, request.message);
            }
        }
    })
}

pub fn invite(ctx: &CliContext, reference: &str, email: &str, by: &str) -> MapGroupResult<()> {
    let group = ctx.find_group(reference)?;
    let inviter = ctx.find_user(by)?;
    let member = group_queries::get_member(&ctx.conn, &group, Some(&inviter))?.ok_or_else(|| {
        crate::error::MapGroupError::NotAMember {
            user: inviter.username.clone(),
            group: group.name.clone(),
        }
    })?;

    let invite = invitation_ops::send_email_invite(&ctx.conn, group.id, member.id, email)?;
    ctx.emit(&invite, || {
        println!("Invited {} to {} (code {})", invite.to_address, group, invite.invite_code)
    })
}
