use rusqlite::Connection;

use crate::db::featured_repo;
use crate::error::{MapGroupError, MapGroupResult};
use crate::model::{FeaturedGroup, Id, MapGroup};
use crate::ops::group_ops::find_group;
use crate::validation;

/// Puts a group in the featured listing at `rank`. Ranks are unique and a
/// group holds at most one.
pub fn feature_group(conn: &Connection, group_id: Id<MapGroup>, rank: i64) -> MapGroupResult<FeaturedGroup> {
    let rank = validation::positive(rank, "rank")?;
    let group = find_group(conn, group_id)?;

    let featured = FeaturedGroup::create(rank, group.id);
    featured_repo::insert(conn, &featured)?;
    tracing::info!(group_id = %group.id, rank, "featured group");
    Ok(featured)
}

pub fn set_rank(conn: &Connection, group_id: Id<MapGroup>, rank: i64) -> MapGroupResult<FeaturedGroup> {
    let rank = validation::positive(rank, "rank")?;
    let mut featured = featured_repo::find_by_group(conn, group_id)?
        .ok_or_else(|| MapGroupError::not_found("FeaturedGroup", group_id))?;

    featured_repo::set_rank(conn, featured.id, rank)?;
    featured.rank = rank;
    Ok(featured)
}

pub fn unfeature_group(conn: &Connection, group_id: Id<MapGroup>) -> MapGroupResult<()> {
    featured_repo::find_by_group(conn, group_id)?
        .ok_or_else(|| MapGroupError::not_found("FeaturedGroup", group_id))?;

    featured_repo::delete_for_group(conn, group_id)?;
    tracing::info!(group_id = %group_id, "unfeatured group");
    Ok(())
}
