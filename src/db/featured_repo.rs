use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{unique_violation, MapGroupResult};
use crate::model::{FeaturedGroup, Id, MapGroup};

pub fn insert(conn: &Connection, featured: &FeaturedGroup) -> MapGroupResult<()> {
    conn.execute(
        "INSERT INTO featured_groups (id, rank, map_group_id) VALUES (?1, ?2, ?3)",
        params![featured.id, featured.rank, featured.map_group_id],
    )
    .map_err(|e| unique_violation(e, "FeaturedGroup", format!("rank {} or {}", featured.rank, featured.map_group_id)))?;
    Ok(())
}

pub fn set_rank(conn: &Connection, id: Id<FeaturedGroup>, rank: u32) -> MapGroupResult<()> {
    conn.execute(
        "UPDATE featured_groups SET rank = ?1 WHERE id = ?2",
        params![rank, id],
    )
    .map_err(|e| unique_violation(e, "FeaturedGroup", format!("rank {}", rank)))?;
    Ok(())
}

pub fn delete_for_group(conn: &Connection, map_group_id: Id<MapGroup>) -> MapGroupResult<()> {
    conn.execute(
        "DELETE FROM featured_groups WHERE map_group_id = ?1",
        params![map_group_id],
    )?;
    Ok(())
}

pub fn find_by_group(conn: &Connection, map_group_id: Id<MapGroup>) -> MapGroupResult<Option<FeaturedGroup>> {
    let featured = conn
        .query_row(
            "SELECT id, rank, map_group_id FROM featured_groups WHERE map_group_id = ?1",
            params![map_group_id],
            from_row,
        )
        .optional()?;
    Ok(featured)
}

/// All ranks, lowest first.
pub fn find_all(conn: &Connection) -> MapGroupResult<Vec<FeaturedGroup>> {
    let mut stmt = conn.prepare("SELECT id, rank, map_group_id FROM featured_groups ORDER BY rank")?;
    let ranks = stmt
        .query_map([], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ranks)
}

fn from_row(row: &Row) -> rusqlite::Result<FeaturedGroup> {
    Ok(FeaturedGroup {
        id: row.get(0)?,
        rank: row.get(1)?,
        map_group_id: row.get(2)?,
    })
}
