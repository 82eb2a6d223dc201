//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email already registered
    #[error("email already registered")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid token (malformed, bad signature, missing subject, or
    /// subject resolving to no account)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Verification code does not match or the account is already verified
    #[error("invalid verification code")]
    InvalidVerificationCode,

    /// Avatar content type outside the allow-list
    #[error("invalid image format, only PNG and JPEG are allowed")]
    InvalidImageFormat,

    /// Avatar upload to object storage failed
    #[error("error uploading image")]
    UploadFailed(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmailTaken => 409,
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::UserNotFound => 404,
            Self::InvalidVerificationCode | Self::InvalidImageFormat => 400,
            Self::UploadFailed(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            Self::InvalidImageFormat => "INVALID_IMAGE_FORMAT",
            Self::UploadFailed(_) => "UPLOAD_FAILED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<carnet_db::DbError> for AuthError {
    fn from(err: carnet_db::DbError) -> Self {
        match err {
            carnet_db::DbError::UniqueViolation => Self::EmailTaken,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
