//! Database connection bootstrap: connect + migrate in one entrypoint.

use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(10));

    // An in-memory SQLite database exists per connection; a pool larger than
    // one would hand out empty databases.
    if profile == DbProfile::Test {
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("failed to run migrations: {e}")))?;

    Ok(conn)
}
