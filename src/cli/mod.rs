pub mod context;
pub mod group_commands;
pub mod member_commands;
pub mod activity_commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db::schema;
use crate::error::MapGroupResult;
use crate::queries::activity_queries::RECENT_DAYS;
use context::CliContext;

/// Manage map groups, their members, featured listing and activity.
#[derive(Debug, Parser)]
#[command(name = "mapgroups", version)]
pub struct Cli {
    /// Database file path.
    #[arg(short, long, env = "MAPGROUPS_DB", default_value = ".data/mapgroups.db")]
    pub file: PathBuf,

    /// Print records as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a user in the identity store.
    AddUser {
        username: String,
        #[arg(long, default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        last: String,
    },
    /// Mark a user inactive.
    DeactivateUser { username: String },
    /// Create a group owned by a user.
    Create {
        name: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        open: bool,
        #[arg(long, default_value = "")]
        blurb: String,
    },
    /// Rename a group and its permission group.
    Rename { group: String, name: String },
    /// Replace a group's blurb.
    SetBlurb { group: String, blurb: String },
    /// Open a group to everyone, or close it to invitation only.
    SetOpen {
        group: String,
        #[arg(action = clap::ArgAction::Set)]
        open: bool,
    },
    /// Delete a group and everything attached to it.
    Delete { group: String },
    /// List groups.
    List {
        #[arg(long, conflicts_with = "not_featured")]
        featured: bool,
        #[arg(long)]
        not_featured: bool,
    },
    /// Show a group with its members.
    Show { group: String },
    /// Join an open group, or ask to join a closed one.
    Join {
        group: String,
        #[arg(long)]
        user: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Add a user to a group directly.
    AddMember {
        group: String,
        username: String,
        #[arg(long)]
        manager: bool,
    },
    /// Remove a user from a group.
    RemoveMember { group: String, username: String },
    /// Place a group in the featured listing.
    Feature { group: String, rank: i64 },
    /// Take a group out of the featured listing.
    Unfeature { group: String },
    /// Append an activity entry.
    Log {
        group: String,
        message: String,
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        user: Option<String>,
    },
    /// Show recent activity visible to a user.
    Activity {
        group: String,
        #[arg(long, default_value_t = RECENT_DAYS)]
        days: i64,
        #[arg(long = "as")]
        viewer: Option<String>,
    },
    /// List pending join requests.
    Requests { group: String },
    /// Invite an email address on behalf of a member.
    Invite {
        group: String,
        email: String,
        #[arg(long)]
        by: String,
    },
}

/// Open the database and run one command against it.
pub fn run(cli: Cli) -> MapGroupResult<()> {
    if let Some(dir) = cli.file.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(&cli.file)?;
    schema::initialize(&conn)?;
    tracing::debug!(path = %cli.file.display(), "opened database");

    let ctx = CliContext::new(conn, cli.json);
    dispatch(&ctx, cli.command)
}

fn dispatch(ctx: &CliContext, command: Command) -> MapGroupResult<()> {
    match command {
        Command::AddUser { username, first, last } => member_commands::add_user(ctx, &username, &first, &last),
        Command::DeactivateUser { username } => member_commands::deactivate_user(ctx, &username),
        Command::Create { name, owner, open, blurb } => group_commands::create(ctx, &name, &owner, open, &blurb),
        Command::Rename { group, name } => group_commands::rename(ctx, &group, &name),
        Command::SetBlurb { group, blurb } => group_commands::set_blurb(ctx, &group, &blurb),
        Command::SetOpen { group, open } => group_commands::set_open(ctx, &group, open),
        Command::Delete { group } => group_commands::delete(ctx, &group),
        Command::List { featured, not_featured } => group_commands::list(ctx, featured, not_featured),
        Command::Show { group } => group_commands::show(ctx, &group),
        Command::Join { group, user, message } => member_commands::join(ctx, &group, &user, message.as_deref()),
        Command::AddMember { group, username, manager } => member_commands::add(ctx, &group, &username, manager),
        Command::RemoveMember { group, username } => member_commands::remove(ctx, &group, &username),
        Command::Feature { group, rank } => group_commands::feature(ctx, &group, rank),
        Command::Unfeature { group } => group_commands::unfeature(ctx, &group),
        Command::Log { group, message, admin, user } => {
            activity_commands::log(ctx, &group, &message, admin, user.as_deref())
        }
        Command::Activity { group, days, viewer } => activity_commands::recent(ctx, &group, days, viewer.as_deref()),
        Command::Requests { group } => member_commands::requests(ctx, &group),
        Command::Invite { group, email, by } => member_commands::invite(ctx, &group, &email, &by),
    }
}
