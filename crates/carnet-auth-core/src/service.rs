//! Auth service - ties together hashing, tokens, verification, and the
//! user store
//!
//! Orchestrates the account state machine: an account is created
//! unverified with a pending code, and a successful verification is the
//! single, terminal transition to verified. Login is not gated on
//! verification (soft verification).

use carnet_db::{CreateUser, UserRepository, UserRow};
use carnet_types::UserId;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    avatar::AvatarStore,
    config::AuthConfig,
    mailer::Mailer,
    password::{hash_password, verify_password},
    token::TokenCodec,
    verification::generate_code,
    AuthError,
};

/// Content types accepted for avatar uploads
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Identity returned from registration (never exposes the hash or code)
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Access and refresh tokens issued at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service
///
/// Provides a unified interface for:
/// - Registration with email verification
/// - Login and token refresh
/// - Per-request identity resolution
/// - Avatar updates
pub struct AuthService<U: UserRepository> {
    config: AuthConfig,
    codec: TokenCodec,
    user_repo: Arc<U>,
    mailer: Arc<dyn Mailer>,
    avatar_store: Arc<dyn AvatarStore>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new auth service
    pub fn new(
        config: AuthConfig,
        user_repo: Arc<U>,
        mailer: Arc<dyn Mailer>,
        avatar_store: Arc<dyn AvatarStore>,
    ) -> Self {
        Self {
            codec: TokenCodec::new(config.token_secret.as_bytes()),
            config,
            user_repo,
            mailer,
            avatar_store,
        }
    }

    // =========================================================================
    // Registration and verification
    // =========================================================================

    /// Register a new account
    ///
    /// Fails with `EmailTaken` if the email is already registered. On
    /// success the account is persisted unverified with a pending
    /// verification code, and the verification email is sent on a
    /// detached task: delivery failure is logged, never reported as a
    /// registration failure.
    pub async fn register(&self, email: &str, password: &str) -> Result<RegisteredUser, AuthError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password)?;
        let code = generate_code(self.config.verification_code_length);

        // The unique constraint closes the check-then-insert race; the
        // DbError mapping turns it into EmailTaken.
        let user = self
            .user_repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash,
                verification_code: code.clone(),
            })
            .await?;

        self.send_verification_email(user.email.clone(), code);

        tracing::info!(user_id = %user.id, "User registered");

        Ok(RegisteredUser {
            id: user.user_id(),
            email: user.email,
            created_at: user.created_at,
        })
    }

    /// Verify an account with a submitted code
    ///
    /// Fails with `UserNotFound` for an unknown email and
    /// `InvalidVerificationCode` when the code does not match the pending
    /// one or the account is already verified. Consumption is atomic:
    /// the code is compared and cleared in a single store operation.
    pub async fn verify_email(&self, email: &str, submitted_code: &str) -> Result<(), AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let consumed = self
            .user_repo
            .consume_verification_code(user.id, submitted_code)
            .await?;

        if !consumed {
            return Err(AuthError::InvalidVerificationCode);
        }

        tracing::info!(user_id = %user.id, "Email verified");
        Ok(())
    }

    /// Send the verification email without blocking the caller
    fn send_verification_email(&self, email: String, code: String) {
        let mailer = Arc::clone(&self.mailer);
        let timeout = self.config.mail_timeout;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, mailer.send_verification(&email, &code)).await {
                Ok(Ok(())) => tracing::info!("Verification email sent"),
                Ok(Err(e)) => tracing::warn!("Failed to send verification email: {}", e),
                Err(_) => tracing::warn!("Verification email send timed out"),
            }
        });
    }

    // =========================================================================
    // Login and tokens
    // =========================================================================

    /// Authenticate with email and password, issuing an access and a
    /// refresh token bound to the account's email
    ///
    /// Unknown email and wrong password are reported identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.codec.issue(&user.email, self.config.access_token_ttl)?;
        let refresh_token = self
            .codec
            .issue(&user.email, self.config.refresh_token_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The refresh token itself is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let subject = self.codec.parse(refresh_token)?;
        self.codec.issue(&subject, self.config.access_token_ttl)
    }

    /// Resolve an access token to the full user identity
    ///
    /// A subject that no longer matches an account is reported as invalid
    /// credentials, not as not-found, to avoid confirming account
    /// existence.
    pub async fn resolve_identity(&self, access_token: &str) -> Result<UserRow, AuthError> {
        let subject = self.codec.parse(access_token)?;

        self.user_repo
            .find_by_email(&subject)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    // =========================================================================
    // Avatar
    // =========================================================================

    /// Upload a new avatar image and persist its URL on the user record
    ///
    /// The URL is persisted only after the upload succeeds.
    pub async fn update_avatar(
        &self,
        user_id: UserId,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AuthError> {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(AuthError::InvalidImageFormat);
        }

        let avatar_url = self
            .avatar_store
            .upload(bytes, content_type)
            .await
            .map_err(|e| AuthError::UploadFailed(e.to_string()))?;

        self.user_repo
            .update_avatar_url(user_id.0, &avatar_url)
            .await?;

        tracing::info!(%user_id, "Avatar updated");
        Ok(avatar_url)
    }
}

impl<U: UserRepository> std::fmt::Debug for AuthService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
