use std::num::NonZeroUsize;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let capacity = NonZeroUsize::new(config.session.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            db,
            config,
            sessions: Arc::new(SessionStore::new(capacity)),
        }
    }
}
