use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::map_group::MapGroup;

/// A slot in the curated listing of promoted groups. Lower ranks come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedGroup {
    pub id: Id<FeaturedGroup>,
    pub rank: u32,
    pub map_group_id: Id<MapGroup>,
}

impl FeaturedGroup {
    pub fn create(rank: u32, map_group_id: Id<MapGroup>) -> Self {
        Self {
            id: Id::generate(),
            rank,
            map_group_id,
        }
    }
}
