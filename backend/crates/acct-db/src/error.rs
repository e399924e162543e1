use acct_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on {column} {location}")]
    Conflict {
        column: String,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(ref db_err) = source
            && db_err.is_unique_violation()
        {
            let column = db_err
                .message()
                .rsplit('.')
                .next()
                .unwrap_or("unknown")
                .to_string();
            return Self::Conflict { column, location };
        }

        Self::Sqlx { source, location }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
