//! Configuration for the Contacts API service.

use carnet_auth_core::{AuthConfig, SmtpSettings};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

/// Contacts API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// SMTP settings for verification email
    pub smtp: SmtpSettings,

    /// Avatar object-storage upload endpoint
    pub avatar_upload_url: String,

    /// Avatar object-storage API key
    pub avatar_api_key: String,

    /// Requests per minute allowed per client IP
    pub rate_limit_per_minute: u32,

    /// Request timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let http_port = std::env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Token secret. When absent a random one is generated, which keeps
        // local development working but invalidates all outstanding tokens
        // on restart.
        let token_secret = match std::env::var("SECRET_KEY") {
            Ok(secret) => {
                if secret.len() < 32 {
                    return Err(ConfigError::Invalid(
                        "SECRET_KEY must be at least 32 characters",
                    ));
                }
                secret
            }
            Err(_) => {
                tracing::warn!(
                    "SECRET_KEY not set, using a generated secret; tokens will not survive a restart"
                );
                generate_secret()
            }
        };

        // Token lifetimes
        let access_ttl_minutes: u64 = std::env::var("ACCESS_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_TTL_MINUTES"))?;

        let refresh_ttl_days: u64 = std::env::var("REFRESH_TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_TTL_DAYS"))?;

        // SMTP
        let smtp = SmtpSettings {
            host: std::env::var("SMTP_HOST").map_err(|_| ConfigError::Missing("SMTP_HOST"))?,
            port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("SMTP_PORT"))?,
            username: std::env::var("SMTP_USER").map_err(|_| ConfigError::Missing("SMTP_USER"))?,
            password: std::env::var("SMTP_PASSWORD")
                .map_err(|_| ConfigError::Missing("SMTP_PASSWORD"))?,
            from: std::env::var("MAIL_FROM").map_err(|_| ConfigError::Missing("MAIL_FROM"))?,
        };

        // Avatar storage
        let avatar_upload_url = std::env::var("AVATAR_UPLOAD_URL")
            .map_err(|_| ConfigError::Missing("AVATAR_UPLOAD_URL"))?;
        let avatar_api_key =
            std::env::var("AVATAR_API_KEY").map_err(|_| ConfigError::Missing("AVATAR_API_KEY"))?;

        // Rate limiting (requests per minute per IP)
        let rate_limit_per_minute: u32 = std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("RATE_LIMIT_PER_MINUTE"))?;

        if rate_limit_per_minute == 0 {
            return Err(ConfigError::Invalid("RATE_LIMIT_PER_MINUTE must be > 0"));
        }

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        let auth = AuthConfig::new(&token_secret)
            .with_access_token_ttl(Duration::from_secs(access_ttl_minutes * 60))
            .with_refresh_token_ttl(Duration::from_secs(refresh_ttl_days * 24 * 3600));

        Ok(Self {
            http_port,
            database_url,
            auth,
            smtp,
            avatar_upload_url,
            avatar_api_key,
            rate_limit_per_minute,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Generate a random 64-character secret for token signing
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secret_is_long_enough_for_hs256() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_secrets_differ() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
