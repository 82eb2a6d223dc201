//! Avatar upload handler

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub message: &'static str,
    pub avatar_url: String,
}

/// PUT /update_avatar/
///
/// Accepts a multipart form with a single `file` part, uploads it to
/// object storage, and persists the returned URL on the caller's account.
pub async fn update_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<AvatarResponse>> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| ApiError::BadRequest("file part must have a content type".to_string()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read file part: {e}")))?;

        file = Some((bytes.to_vec(), content_type));
        break;
    }

    let (bytes, content_type) =
        file.ok_or_else(|| ApiError::BadRequest("missing 'file' part".to_string()))?;

    if bytes.is_empty() {
        return Err(ApiError::BadRequest("file part is empty".to_string()));
    }

    let avatar_url = state
        .auth
        .update_avatar(auth_user.user_id, bytes, &content_type)
        .await?;

    Ok(Json(AvatarResponse {
        message: "Avatar updated",
        avatar_url,
    }))
}
