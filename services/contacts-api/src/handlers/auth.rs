//! Account handlers (register, login, refresh, verify_email)

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a registration email (structural check only, ownership is
/// proven by the verification code)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email cannot be empty");
    }
    let Some(at) = email.find('@') else {
        return Err("email must contain '@'");
    };
    if at == 0 || at == email.len() - 1 {
        return Err("email must have a local part and a domain");
    }
    Ok(())
}

/// Validate a registration password
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err("password must be at least 8 characters");
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register/
///
/// Create a new account and queue the verification email
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_email(&req.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validate_password(&req.password).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state.auth.register(req.email.trim(), &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created. Check your email for the verification code.".to_string(),
            user: UserInfo {
                id: user.id.to_string(),
                email: user.email,
            },
        }),
    ))
}

/// POST /login/
///
/// Authenticate and issue an access/refresh token pair
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let tokens = state.auth.login(req.email.trim(), &req.password).await?;

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "bearer",
    }))
}

/// POST /refresh/
///
/// Exchange a refresh token for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = state.auth.refresh(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// POST /verify_email/
///
/// Consume a verification code and mark the account verified
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.verify_email(req.email.trim(), &req.code).await?;

    Ok(Json(MessageResponse {
        message: "Email verified",
    }))
}
