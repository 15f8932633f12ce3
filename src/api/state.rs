//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state holding the services handlers depend on.
///
/// The persistence handle is injected here once at startup; handlers
/// never reach for a shared singleton.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state backed by the database connection.
    pub fn from_database(database: &Database) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        Self {
            user_service: Arc::new(UserManager::new(repo)),
        }
    }

    /// Create application state with a manually injected service.
    ///
    /// Used by tests to run the full router without a database.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}
