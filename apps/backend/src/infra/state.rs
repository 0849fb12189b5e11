use crate::config::db::ConnectionSettings;
use crate::config::profile::Profile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::views::Views;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Debug, Default)]
pub struct StateBuilder {
    profile: Option<Profile>,
    settings: Option<ConnectionSettings>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile to resolve connection settings for; `APP_ENV` otherwise.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use these settings instead of reading the config file and environment.
    pub fn with_settings(mut self, settings: ConnectionSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Resolve settings, bootstrap the database and load the views.
    pub async fn build(self) -> Result<AppState, AppError> {
        let settings = match self.settings {
            Some(settings) => settings,
            None => {
                let profile = match self.profile {
                    Some(profile) => profile,
                    None => Profile::from_env()?,
                };
                ConnectionSettings::from_env(profile)?
            }
        };

        let views = Views::new()?;
        let db = bootstrap_db(&settings).await?;
        Ok(AppState::new(db, settings.profile, views))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
