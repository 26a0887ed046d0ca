use serde::{Deserialize, Serialize};

use super::ids::Id;

/// An account in the identity store. Map groups only read these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id<User>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

impl User {
    pub fn create(username: String, first_name: String, last_name: String) -> Self {
        Self {
            id: Id::generate(),
            username,
            first_name,
            last_name,
            is_active: true,
        }
    }

    /// First and last name separated by a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// The first name, or the username when no first name is on file.
    pub fn short_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}
