use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::profile::Profile;
use crate::error::AppError;
use crate::views::Views;

/// Persistence context and shared resources handed to the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    db: DatabaseConnection,
    profile: Profile,
    views: Arc<Views>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, profile: Profile, views: Views) -> Self {
        Self {
            db,
            profile,
            views: Arc::new(views),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Close the connection pool. Other clones of this state become unusable.
    pub async fn close(self) -> Result<(), AppError> {
        info!(profile = %self.profile, "pool=close");
        self.db.close().await.map_err(AppError::from)
    }
}
