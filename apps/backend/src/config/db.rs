//! Database profile selection and URL resolution.

use crate::error::AppError;

/// Which database the process should connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Postgres, configured via `DATABASE_URL`
    Prod,
    /// In-memory SQLite for tests
    Test,
}

/// Resolve the connection URL for the given profile.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => std::env::var("DATABASE_URL")
            .map_err(|_| AppError::config("DATABASE_URL must be set".to_string())),
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
    }
}
