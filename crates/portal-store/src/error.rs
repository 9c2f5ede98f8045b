use portal_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Unique constraint violation on '{field}' {location}")]
    UniqueViolation {
        field: String,
        location: ErrorLocation,
    },

    #[error("Store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt record for subject '{subject_id}': {message} {location}")]
    CorruptRecord {
        subject_id: String,
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for StoreError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = source
            && db.is_unique_violation()
        {
            // SQLite reports "UNIQUE constraint failed: profiles.email"
            let field = db
                .message()
                .rsplit('.')
                .next()
                .unwrap_or("unknown")
                .trim()
                .to_string();
            return Self::UniqueViolation {
                field,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        match source {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable {
                    message: source.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            _ => Self::Sqlx {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
