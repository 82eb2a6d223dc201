//! Configuration types for the auth service

use std::time::Duration;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing (shared, process-wide)
    pub token_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
    /// Length of generated verification codes
    pub verification_code_length: usize,
    /// Upper bound on a single outbound verification-email send
    pub mail_timeout: Duration,
}

impl AuthConfig {
    /// Create a new auth config with default lifetimes
    /// (30-minute access tokens, 30-day refresh tokens)
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            access_token_ttl: Duration::from_secs(30 * 60),
            refresh_token_ttl: Duration::from_secs(30 * 24 * 60 * 60),
            verification_code_length: crate::verification::DEFAULT_CODE_LENGTH,
            mail_timeout: Duration::from_secs(10),
        }
    }

    /// Set access token lifetime
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Set refresh token lifetime
    pub fn with_refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = ttl;
        self
    }

    /// Set verification code length
    pub fn with_verification_code_length(mut self, length: usize) -> Self {
        self.verification_code_length = length;
        self
    }

    /// Set the outbound mail timeout
    pub fn with_mail_timeout(mut self, timeout: Duration) -> Self {
        self.mail_timeout = timeout;
        self
    }
}
