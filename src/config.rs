use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Environment variable prefix, e.g. `USERS_DATABASE_URL`.
pub const ENV_PREFIX: &str = "USERS_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub max_connections: u32,
    pub request_timeout_secs: u64,
    pub login_username: String,
    pub login_password: String,
    pub login_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://users.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            max_connections: 5,
            request_timeout_secs: 30,
            login_username: "user".to_string(),
            login_password: "password".to_string(),
            login_token: "your_token_here".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `USERS_*` environment variables.
    pub fn load() -> Result<Self, ServiceError> {
        Self::figment().extract().map_err(Into::into)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
