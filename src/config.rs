use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

use url::Url;

use crate::services::keycloak::KeycloakConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn from_raw(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub keycloak: KeycloakConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Every provider setting is mandatory: a process with a partial
    /// Keycloak configuration must refuse to start rather than fail
    /// closed on every request at runtime.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        fn required(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &'static str,
        ) -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        }

        let port: u16 = lookup("APP_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("APP_PORT"))?;

        let app_env = AppEnv::from_raw(lookup("APP_ENV"));

        let database_url = required(&lookup, "DATABASE_URL")?;

        let server_url = required(&lookup, "KEYCLOAK_SERVER_URL")?;
        Url::parse(&server_url).map_err(|_| ConfigError::Invalid("KEYCLOAK_SERVER_URL"))?;

        let timeout_seconds: u64 = lookup("KEYCLOAK_TIMEOUT_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let keycloak = KeycloakConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            realm: required(&lookup, "KEYCLOAK_REALM")?,
            client_id: required(&lookup, "KEYCLOAK_CLIENT_ID")?,
            client_secret: required(&lookup, "KEYCLOAK_CLIENT_SECRET_KEY")?,
            group_key: required(&lookup, "KEYCLOAK_CLIENT_GROUP_KEY")?,
            timeout: Duration::from_secs(timeout_seconds),
        };

        Ok(Config {
            addr,
            app_env,
            database_url,
            keycloak,
        })
    }
}
