use rusqlite::Connection;

use crate::db::{featured_repo, group_repo};
use crate::error::MapGroupResult;
use crate::model::{FeaturedGroup, MapGroup};

/// Featured groups, lowest rank first.
pub fn featured(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_featured(conn)
}

/// Groups without a rank, by name.
pub fn not_featured(conn: &Connection) -> MapGroupResult<Vec<MapGroup>> {
    group_repo::find_not_featured(conn)
}

/// Featured groups with their rank records, lowest rank first.
pub fn featured_with_rank(conn: &Connection) -> MapGroupResult<Vec<(FeaturedGroup, MapGroup)>> {
    let ranks = featured_repo::find_all(conn)?;
    let mut results = Vec::with_capacity(ranks.len());

    for rank in ranks {
        if let Some(group) = group_repo::find_by_id(conn, rank.map_group_id)? {
            results.push((rank, group));
        }
    }

    Ok(results)
}
