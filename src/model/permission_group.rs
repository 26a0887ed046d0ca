use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Identity-store group used to scope access rights. Each map group owns
/// exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGroup {
    pub id: Id<PermissionGroup>,
    pub name: String,
}

impl PermissionGroup {
    pub fn create(name: String) -> Self {
        Self {
            id: Id::generate(),
            name,
        }
    }
}
