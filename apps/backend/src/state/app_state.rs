use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::notify::{Notifier, NoopNotifier};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Outbound notification collaborator (SMS); best-effort only
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db: Some(db),
            security,
            notifier,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Access the database connection, if configured
    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Create a test AppState with the given database connection, a default
    /// security config and a no-op notifier
    pub fn for_tests(db: DatabaseConnection) -> Self {
        Self::new(db, SecurityConfig::default(), Arc::new(NoopNotifier))
    }
}
