use rusqlite::Connection;

use crate::db::permission_group_repo;
use crate::error::MapGroupResult;
use crate::model::PermissionGroup;

/// The feature-sharing subsystem. It has to hear about every new permission
/// group before that group can be used to share features.
///
/// Calls run inside the caller's transaction, so an error here rolls back
/// the group that was being created.
pub trait SharingRegistry {
    fn enable_sharing(&self, conn: &Connection, group: &PermissionGroup) -> MapGroupResult<()>;
}

/// Registry that records shared groups in `shared_permission_groups`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteSharingRegistry;

impl SharingRegistry for SqliteSharingRegistry {
    fn enable_sharing(&self, conn: &Connection, group: &PermissionGroup) -> MapGroupResult<()> {
        permission_group_repo::mark_shared(conn, group.id)
    }
}
