use std::cell::Cell;

use mapgroups::db::*;
use mapgroups::error::{MapGroupError, MapGroupResult};
use mapgroups::model::*;
use mapgroups::ops::member_ops::JoinOutcome;
use mapgroups::ops::*;
use mapgroups::queries::*;
use mapgroups::sharing::{SharingRegistry, SqliteSharingRegistry};
use rusqlite::Connection;

fn setup() -> (Connection, User) {
    let conn = schema::test_connection();
    let owner = user_ops::add_user(&conn, "ann", "Ann", "Lee").unwrap();
    (conn, owner)
}

fn create(conn: &Connection, owner: &User, name: &str) -> (MapGroup, MapGroupMember) {
    group_ops::create_group(conn, &SqliteSharingRegistry, owner.id, name, false, "").unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}

#[derive(Default)]
struct CountingRegistry {
    calls: Cell<usize>,
}

impl SharingRegistry for CountingRegistry {
    fn enable_sharing(&self, _conn: &Connection, _group: &PermissionGroup) -> MapGroupResult<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

struct FailingRegistry;

impl SharingRegistry for FailingRegistry {
    fn enable_sharing(&self, _conn: &Connection, _group: &PermissionGroup) -> MapGroupResult<()> {
        Err(MapGroupError::Other("sharing unavailable".into()))
    }
}

// ==========================================================================
// USER OPS TESTS
// ==========================================================================

#[test]
fn add_user_rejects_blank_username() {
    let conn = schema::test_connection();
    assert!(user_ops::add_user(&conn, "  ", "", "").is_err());
}

#[test]
fn set_active_toggles_flag() {
    let (conn, owner) = setup();
    let user = user_ops::set_active(&conn, owner.id, false).unwrap();
    assert!(!user.is_active);
    assert!(!user_repo::find_by_id(&conn, owner.id).unwrap().unwrap().is_active);
}

// ==========================================================================
// GROUP OPS TESTS
// ==========================================================================

#[test]
fn create_group_returns_group_and_manager_membership() {
    let (conn, owner) = setup();
    let (group, member) = group_ops::create_group(
        &conn,
        &SqliteSharingRegistry,
        owner.id,
        "Reef Watch",
        true,
        "  Monitoring the north reef  ",
    )
    .unwrap();

    assert_eq!(group.name, "Reef Watch");
    assert_eq!(group.slug, "reef-watch");
    assert_eq!(group.blurb, "Monitoring the north reef");
    assert!(group.is_open);
    assert_eq!(group.owner_id, owner.id);
    assert!(member.is_manager);
    assert_eq!(member.user_id, owner.id);
    assert_eq!(member.map_group_id, group.id);
    assert!(group_queries::has_member(&conn, &group, Some(&owner)).unwrap());
}

#[test]
fn create_group_makes_fresh_shared_permission_group() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef Watch");

    let pg = group_queries::permission_group_of(&conn, &group).unwrap();
    assert!(pg.name.starts_with("reef-watch"));
    assert_eq!(pg.name.len(), "reef-watch".len() + 8);
    assert!(permission_group_repo::is_shared(&conn, pg.id).unwrap());
    assert_eq!(group_queries::permission_holders(&conn, &group).unwrap(), vec![owner.id]);
}

#[test]
fn groups_with_same_name_get_distinct_permission_groups() {
    let (conn, owner) = setup();
    let (a, _) = create(&conn, &owner, "Reef Watch");
    let (b, _) = create(&conn, &owner, "Reef Watch");

    assert_eq!(a.slug, b.slug);
    assert_ne!(a.permission_group_id, b.permission_group_id);
    let pg_a = group_queries::permission_group_of(&conn, &a).unwrap();
    let pg_b = group_queries::permission_group_of(&conn, &b).unwrap();
    assert_ne!(pg_a.name, pg_b.name);
}

#[test]
fn permission_group_name_bounded_for_long_display_name() {
    let (conn, owner) = setup();
    let long = "Kelp ".repeat(100);
    let (group, _) = create(&conn, &owner, &long[..250]);

    let pg = group_queries::permission_group_of(&conn, &group).unwrap();
    assert!(pg.name.len() <= 80);
}

#[test]
fn create_group_rejects_oversized_names() {
    let (conn, owner) = setup();
    let result = group_ops::create_group(&conn, &SqliteSharingRegistry, owner.id, &"a".repeat(500), false, "");
    assert!(matches!(result, Err(MapGroupError::TooLong { .. })));
}

#[test]
fn create_group_calls_registry_once() {
    let (conn, owner) = setup();
    let registry = CountingRegistry::default();
    group_ops::create_group(&conn, &registry, owner.id, "Reef", false, "").unwrap();
    assert_eq!(registry.calls.get(), 1);
}

#[test]
fn create_group_rolls_back_when_registry_fails() {
    let (conn, owner) = setup();
    let result = group_ops::create_group(&conn, &FailingRegistry, owner.id, "Reef", false, "");
    assert!(result.is_err());

    assert_eq!(count(&conn, "permission_groups"), 0);
    assert_eq!(count(&conn, "map_groups"), 0);
    assert_eq!(count(&conn, "map_group_members"), 0);
}

#[test]
fn create_group_rejects_blank_name_and_unknown_owner() {
    let (conn, owner) = setup();
    assert!(matches!(
        group_ops::create_group(&conn, &SqliteSharingRegistry, owner.id, "   ", false, ""),
        Err(MapGroupError::BlankField { .. })
    ));
    assert!(matches!(
        group_ops::create_group(&conn, &SqliteSharingRegistry, Id::generate(), "Reef", false, ""),
        Err(MapGroupError::NotFound { .. })
    ));
}

#[test]
fn rename_updates_slug_and_rederives_permission_group_name() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef Watch");
    let before = group_queries::permission_group_of(&conn, &group).unwrap();

    let renamed = group_ops::rename_group(&conn, group.id, "New Name").unwrap();
    assert_eq!(renamed.name, "New Name");
    assert_eq!(renamed.slug, "new-name");

    let stored = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert_eq!(stored.slug, "new-name");

    let after = group_queries::permission_group_of(&conn, &stored).unwrap();
    assert_eq!(after.id, before.id);
    assert_ne!(after.name, before.name);
    assert!(after.name.starts_with("new-name"));
}

#[test]
fn rename_rolls_back_when_permission_group_write_fails() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef Watch");
    let before = group_queries::permission_group_of(&conn, &group).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER block_pg_rename BEFORE UPDATE ON permission_groups
         BEGIN SELECT RAISE(ABORT, 'identity store unavailable'); END;",
    )
    .unwrap();

    assert!(group_ops::rename_group(&conn, group.id, "New Name").is_err());

    let stored = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert_eq!(stored.name, "Reef Watch");
    assert_eq!(stored.slug, "reef-watch");
    let after = group_queries::permission_group_of(&conn, &stored).unwrap();
    assert_eq!(after.name, before.name);
}

#[test]
fn symbol_only_name_gets_id_only_url() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "!!!");
    assert_eq!(group.slug, "");
    assert_eq!(group.absolute_url(), format!("/groups/{}/", group.id));

    let pg = group_queries::permission_group_of(&conn, &group).unwrap();
    assert_eq!(pg.name.len(), 8);
}

#[test]
fn rename_missing_group_is_not_found() {
    let (conn, _) = setup();
    assert!(matches!(
        group_ops::rename_group(&conn, Id::generate(), "x"),
        Err(MapGroupError::NotFound { .. })
    ));
}

#[test]
fn set_blurb_and_open() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    group_ops::set_blurb(&conn, group.id, "hello").unwrap();
    group_ops::set_open(&conn, group.id, true).unwrap();

    let stored = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert_eq!(stored.blurb, "hello");
    assert!(stored.is_open);
    assert!(group_ops::set_blurb(&conn, group.id, &"b".repeat(513)).is_err());
}

#[test]
fn delete_group_removes_group_and_permission_group() {
    let (conn, owner) = setup();
    let (group, member) = create(&conn, &owner, "Reef");
    featured_ops::feature_group(&conn, group.id, 1).unwrap();
    activity_ops::log_activity(&conn, group.id, "hi", false, None).unwrap();
    invitation_ops::send_email_invite(&conn, group.id, member.id, "x@example.org").unwrap();

    group_ops::delete_group(&conn, group.id).unwrap();

    assert!(group_queries::get_group(&conn, group.id).unwrap().is_none());
    assert!(permission_group_repo::find_by_id(&conn, group.permission_group_id).unwrap().is_none());
    assert_eq!(count(&conn, "map_group_members"), 0);
    assert_eq!(count(&conn, "featured_groups"), 0);
    assert_eq!(count(&conn, "activity_logs"), 0);
    assert_eq!(count(&conn, "email_invitations"), 0);
    assert_eq!(count(&conn, "shared_permission_groups"), 0);
}

// ==========================================================================
// MEMBER OPS TESTS
// ==========================================================================

#[test]
fn add_member_joins_permission_group() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();

    let member = member_ops::add_member(&conn, group.id, bob.id, false).unwrap();
    assert!(!member.is_manager);
    assert!(group_queries::permission_holders(&conn, &group).unwrap().contains(&bob.id));
}

#[test]
fn second_membership_for_same_pair_fails() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let err = member_ops::add_member(&conn, group.id, owner.id, false).unwrap_err();
    assert!(matches!(err, MapGroupError::AlreadyExists { .. }));
}

#[test]
fn join_open_group_adds_member_and_logs() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    group_ops::set_open(&conn, group.id, true).unwrap();
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();

    match member_ops::join_group(&conn, group.id, bob.id, None).unwrap() {
        JoinOutcome::Joined(member) => assert_eq!(member.user_id, bob.id),
        other => panic!("expected to join, got {:?}", other),
    }
    let entries = activity_queries::all_activity(&conn, group.id).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "Bob joined the group");
    assert_eq!(entries[0].associated_user_id, Some(bob.id));
}

#[test]
fn join_closed_group_files_request() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();

    match member_ops::join_group(&conn, group.id, bob.id, Some(" let me in ")).unwrap() {
        JoinOutcome::Requested(request) => assert_eq!(request.message, "let me in"),
        other => panic!("expected a request, got {:?}", other),
    }
    assert!(!member_repo::exists(&conn, group.id, bob.id).unwrap());
    assert_eq!(invitation_queries::pending_requests(&conn, group.id).unwrap().len(), 1);
}

#[test]
fn join_closed_group_checks_message_length() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();

    let long = "m".repeat(513);
    assert!(matches!(
        member_ops::join_group(&conn, group.id, bob.id, Some(&long)),
        Err(MapGroupError::TooLong { .. })
    ));
    assert!(invitation_queries::pending_requests(&conn, group.id).unwrap().is_empty());

    match member_ops::join_group(&conn, group.id, bob.id, None).unwrap() {
        JoinOutcome::Requested(request) => assert_eq!(request.message, ""),
        other => panic!("expected a request, got {:?}", other),
    }
}

#[test]
fn join_rejects_inactive_and_existing_members() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    assert!(matches!(
        member_ops::join_group(&conn, group.id, owner.id, None),
        Err(MapGroupError::AlreadyExists { .. })
    ));

    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();
    user_ops::set_active(&conn, bob.id, false).unwrap();
    assert!(matches!(
        member_ops::join_group(&conn, group.id, bob.id, None),
        Err(MapGroupError::InactiveUser(_))
    ));
}

#[test]
fn remove_member_revokes_permission() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();
    member_ops::add_member(&conn, group.id, bob.id, false).unwrap();

    member_ops::remove_member(&conn, group.id, bob.id).unwrap();
    assert!(!member_repo::exists(&conn, group.id, bob.id).unwrap());
    assert!(!group_queries::permission_holders(&conn, &group).unwrap().contains(&bob.id));

    assert!(matches!(
        member_ops::remove_member(&conn, group.id, bob.id),
        Err(MapGroupError::NotAMember { .. })
    ));
}

#[test]
fn owner_cannot_be_removed() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    assert!(matches!(
        member_ops::remove_member(&conn, group.id, owner.id),
        Err(MapGroupError::CannotRemoveOwner)
    ));
}

#[test]
fn membership_flags_update() {
    let (conn, owner) = setup();
    let (_, member) = create(&conn, &owner, "Reef");

    let member = member_ops::set_manager(&conn, member.id, false).unwrap();
    assert!(!member.is_manager);
    let member = member_ops::set_show_real_name(&conn, member.id, true).unwrap();
    assert!(member.show_real_name);

    let stored = member_repo::find_by_id(&conn, member.id).unwrap().unwrap();
    assert!(!stored.is_manager);
    assert!(stored.show_real_name);
}

// ==========================================================================
// FEATURED OPS TESTS
// ==========================================================================

#[test]
fn feature_group_rejects_non_positive_rank() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    assert!(matches!(
        featured_ops::feature_group(&conn, group.id, 0),
        Err(MapGroupError::NonPositive { .. })
    ));
}

#[test]
fn duplicate_rank_surfaces_as_already_exists() {
    let (conn, owner) = setup();
    let (a, _) = create(&conn, &owner, "A");
    let (b, _) = create(&conn, &owner, "B");
    featured_ops::feature_group(&conn, a.id, 1).unwrap();
    assert!(matches!(
        featured_ops::feature_group(&conn, b.id, 1),
        Err(MapGroupError::AlreadyExists { .. })
    ));
}

#[test]
fn set_rank_and_unfeature() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    featured_ops::feature_group(&conn, group.id, 4).unwrap();

    let featured = featured_ops::set_rank(&conn, group.id, 2).unwrap();
    assert_eq!(featured.rank, 2);
    assert_eq!(featured_repo::find_by_group(&conn, group.id).unwrap().unwrap().rank, 2);

    featured_ops::unfeature_group(&conn, group.id).unwrap();
    assert!(featured_repo::find_by_group(&conn, group.id).unwrap().is_none());
    assert!(featured_ops::unfeature_group(&conn, group.id).is_err());
}

// ==========================================================================
// ACTIVITY AND INVITATION OPS TESTS
// ==========================================================================

#[test]
fn log_activity_validates_message() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    assert!(activity_ops::log_activity(&conn, group.id, "  ", false, None).is_err());
    assert!(activity_ops::log_activity(&conn, group.id, &"m".repeat(257), false, None).is_err());

    let entry = activity_ops::log_activity(&conn, group.id, "Survey posted", true, Some(owner.id)).unwrap();
    assert!(entry.admin);
    assert_eq!(entry.associated_user_id, Some(owner.id));
}

#[test]
fn request_to_join_allows_repeats() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let bob = user_ops::add_user(&conn, "bob", "Bob", "").unwrap();

    invitation_ops::request_to_join(&conn, group.id, bob.id, "").unwrap();
    invitation_ops::request_to_join(&conn, group.id, bob.id, "still keen").unwrap();
    assert_eq!(invitation_queries::requests_by_user(&conn, bob.id).unwrap().len(), 2);
    assert!(invitation_ops::request_to_join(&conn, group.id, bob.id, &"m".repeat(513)).is_err());
}

#[test]
fn send_email_invite_generates_code() {
    let (conn, owner) = setup();
    let (group, member) = create(&conn, &owner, "Reef");

    let invite = invitation_ops::send_email_invite(&conn, group.id, member.id, " diver@example.org ").unwrap();
    assert_eq!(invite.to_address, "diver@example.org");
    assert_eq!(invite.invite_code.len(), 32);
    assert!(invite.invite_code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(invite.invited_by, member.id);

    let found = invitation_queries::find_invite_by_code(&conn, &invite.invite_code).unwrap().unwrap();
    assert_eq!(found.id, invite.id);
}

#[test]
fn send_email_invite_requires_membership_in_that_group() {
    let (conn, owner) = setup();
    let (group, _) = create(&conn, &owner, "Reef");
    let (_, other_member) = create(&conn, &owner, "Kelp");

    assert!(matches!(
        invitation_ops::send_email_invite(&conn, group.id, other_member.id, "x@example.org"),
        Err(MapGroupError::NotAMember { .. })
    ));
    assert!(matches!(
        invitation_ops::send_email_invite(&conn, group.id, other_member.id, "nope"),
        Err(MapGroupError::InvalidEmail(_))
    ));
}
