//! Runtime profile selection (`development`, `test`, `production`).

use std::env::{self, VarError};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Environment variable naming the active profile.
pub const PROFILE_ENV_VAR: &str = "APP_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    #[default]
    Development,
    Test,
    Production,
}

impl Profile {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Test => "test",
            Profile::Production => "production",
        }
    }

    /// Read the profile from `APP_ENV`, defaulting to `development`.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var(PROFILE_ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => raw.parse(),
            Ok(_) | Err(VarError::NotPresent) => Ok(Profile::Development),
            Err(e) => Err(AppError::config(format!(
                "failed to read {PROFILE_ENV_VAR}: {e}"
            ))),
        }
    }

    /// SQL statements are logged in development only.
    pub const fn sql_logging(&self) -> bool {
        matches!(self, Profile::Development)
    }
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "test" => Ok(Profile::Test),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(AppError::config(format!(
                "unknown profile '{other}'; expected development, test or production"
            ))),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
