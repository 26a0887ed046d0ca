use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapGroupError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("User {user} is not a member of {group}")]
    NotAMember { user: String, group: String },

    #[error("User {0} is inactive")]
    InactiveUser(String),

    #[error("Cannot remove the owner from their own group")]
    CannotRemoveOwner,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type MapGroupResult<T> = Result<T, MapGroupError>;

impl MapGroupError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        MapGroupError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}

/// Translates a unique or primary-key violation into `AlreadyExists`;
/// every other error is passed through as a database error.
pub fn unique_violation(e: rusqlite::Error, entity_type: &str, identifier: impl ToString) -> MapGroupError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            MapGroupError::AlreadyExists {
                entity_type: entity_type.into(),
                identifier: identifier.to_string(),
            }
        }
        _ => MapGroupError::Database(e),
    }
}
