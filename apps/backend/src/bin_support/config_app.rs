//! Server configuration loaded from environment variables.

use std::env::{self, VarError};

use crate::config::profile::Profile;
use crate::error::AppError;

pub const HOST_ENV_VAR: &str = "HOST";
pub const PORT_ENV_VAR: &str = "PORT";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub profile: Profile,
}

fn optional_var(name: &str) -> Result<Option<String>, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(Some(value.trim().to_string())),
        Ok(_) | Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::config(format!("failed to read {name}: {e}"))),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = optional_var(HOST_ENV_VAR)?.unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match optional_var(PORT_ENV_VAR)? {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("{PORT_ENV_VAR} must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            host,
            port,
            profile: Profile::from_env()?,
        })
    }
}
