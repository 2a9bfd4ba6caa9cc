pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns a borrowed reference to the DatabaseConnection if available,
/// or `AppError::DbUnavailable` if the database is not configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn test_require_db_without_db() {
        let app_state = AppState::new_without_db(SecurityConfig::default());

        let result = require_db(&app_state);
        assert!(matches!(result, Err(AppError::DbUnavailable)));
    }
}
