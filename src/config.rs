use std::env;

use crate::error::ConfigError;

/// Process configuration, resolved once at startup and passed explicitly to
/// whatever needs it. Nothing in the crate reads the environment after this.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub bind_address: String,
}

const DEFAULT_DATABASE: &str = "TripSplit";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_uri =
            env::var("MONGODB_URI").map_err(|_| ConfigError::MissingVar("MONGODB_URI"))?;
        let database_name = env::var("TRIPSPLIT_DB").unwrap_or_else(|_| {
            tracing::debug!("TRIPSPLIT_DB not set, using {DEFAULT_DATABASE}");
            DEFAULT_DATABASE.to_string()
        });
        let bind_address = env::var("TRIPSPLIT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        Ok(AppConfig {
            mongodb_uri,
            database_name,
            bind_address,
        })
    }
}
