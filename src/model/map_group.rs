use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::permission_group::PermissionGroup;
use super::user::User;
use crate::slug;

pub const NAME_MAX: usize = 255;
pub const BLURB_MAX: usize = 512;

/// A user-owned collaborative group.
///
/// `slug` is for display and URLs only and may repeat across groups; the
/// linked permission group's name is the unique one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGroup {
    pub id: Id<MapGroup>,
    pub name: String,
    pub slug: String,
    pub owner_id: Id<User>,
    pub blurb: String,
    pub permission_group_id: Id<PermissionGroup>,
    /// If false, users must be invited or request to join.
    pub is_open: bool,
}

impl MapGroup {
    pub fn create(
        name: String,
        owner_id: Id<User>,
        blurb: String,
        permission_group_id: Id<PermissionGroup>,
        is_open: bool,
    ) -> Self {
        Self {
            id: Id::generate(),
            slug: slug::slugify(&name),
            name,
            owner_id,
            blurb,
            permission_group_id,
            is_open,
        }
    }

    /// Sets the display name and re-derives the slug from it.
    pub fn set_name(&mut self, name: String) {
        self.slug = slug::slugify(&name);
        self.name = name;
    }

    /// Canonical detail path, keyed by id and slug. Names with no
    /// sluggable characters get the id-only path.
    pub fn absolute_url(&self) -> String {
        if self.slug.is_empty() {
            format!("/groups/{}/", self.id)
        } else {
            format!("/groups/{}/{}/", self.id, self.slug)
        }
    }
}

impl std::fmt::Display for MapGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Map Group '{}'", self.name)
    }
}
