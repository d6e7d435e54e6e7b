use std::net::IpAddr;

use sqlx::postgres::PgSslMode;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_ssl_mode: PgSslMode,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub http_timeout_secs: u64,
    pub log_level: String,
    pub platform: PlatformConfig,
}

/// Credentials and base URLs of the journey platform's REST APIs.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub auth_base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub rest_base_url: String,
}

impl PlatformConfig {
    pub fn token_url(&self) -> String {
        format!("{}/v2/token", self.auth_base_url.trim_end_matches('/'))
    }

    pub fn events_url(&self) -> String {
        format!("{}/interaction/v1/events", self.rest_base_url.trim_end_matches('/'))
    }

    pub fn interactions_url(&self) -> String {
        format!(
            "{}/interaction/v1/interactions/",
            self.rest_base_url.trim_end_matches('/')
        )
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // No defaults: an unset value fails on the first call that needs it.
        let database_url = env_or("DATABASE_URL", "");
        let platform = PlatformConfig {
            auth_base_url: env_or("authenticationUrl", ""),
            client_id: env_or("clientId", ""),
            client_secret: env_or("clientSecret", ""),
            rest_base_url: env_or("restBaseURL", ""),
        };

        let database_ssl_mode = match env_or("DATABASE_SSL_MODE", "require").as_str() {
            "require" => PgSslMode::Require,
            "prefer" => PgSslMode::Prefer,
            "disable" => PgSslMode::Disable,
            other => return Err(format!("Invalid DATABASE_SSL_MODE: {other}")),
        };

        let host: IpAddr = env_or("ACTIVITY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ACTIVITY_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let max_body_size: usize = env_or("ACTIVITY_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid ACTIVITY_MAX_BODY_SIZE: {e}"))?;

        let http_timeout_secs: u64 = env_or("ACTIVITY_HTTP_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid ACTIVITY_HTTP_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("ACTIVITY_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            database_ssl_mode,
            host,
            port,
            max_body_size,
            http_timeout_secs,
            log_level,
            platform,
        })
    }

    /// Names of the required environment variables that were not set.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        [
            ("DATABASE_URL", &self.database_url),
            ("authenticationUrl", &self.platform.auth_base_url),
            ("clientId", &self.platform.client_id),
            ("clientSecret", &self.platform.client_secret),
            ("restBaseURL", &self.platform.rest_base_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
