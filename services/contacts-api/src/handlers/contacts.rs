//! Contact CRUD handlers
//!
//! Every operation is scoped to the authenticated owner. A contact owned
//! by someone else is reported as not found, never as forbidden.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carnet_db::{ContactPatch, ContactRepository, ContactRow, CreateContact};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Default page size when `limit` is not given
const DEFAULT_PAGE_LIMIT: i64 = 100;
/// Hard cap on a single page
const MAX_PAGE_LIMIT: i64 = 500;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
    pub created_at: String,
}

impl From<ContactRow> for ContactResponse {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id.to_string(),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone_number,
            birthday: row.birthday,
            additional_info: row.additional_info,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /contacts/
///
/// List the caller's contacts with skip/limit pagination
pub async fn list_contacts(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ContactResponse>>> {
    if params.skip < 0 {
        return Err(ApiError::BadRequest("skip must be non-negative".to_string()));
    }

    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit < 0 {
        return Err(ApiError::BadRequest("limit must be non-negative".to_string()));
    }
    let limit = limit.min(MAX_PAGE_LIMIT);

    let rows = state
        .repos
        .contacts
        .list_by_owner(auth_user.user_id.0, params.skip, limit)
        .await?;

    Ok(Json(rows.into_iter().map(ContactResponse::from).collect()))
}

/// POST /contacts/
///
/// Create a contact owned by the caller
pub async fn create_contact(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateContactRequest>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .repos
        .contacts
        .create(CreateContact {
            id: Uuid::new_v4(),
            owner_id: auth_user.user_id.0,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            birthday: req.birthday,
            additional_info: req.additional_info,
        })
        .await?;

    tracing::info!(contact_id = %row.id, owner_id = %auth_user.user_id, "Contact created");

    Ok((StatusCode::CREATED, Json(ContactResponse::from(row))))
}

/// GET /contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ContactResponse>> {
    let row = state
        .repos
        .contacts
        .find_by_id(id, auth_user.user_id.0)
        .await?
        .ok_or(ApiError::ContactNotFound)?;

    Ok(Json(ContactResponse::from(row)))
}

/// PUT /contacts/{id}
///
/// Partial update: absent fields keep their stored values
pub async fn update_contact(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> ApiResult<Json<ContactResponse>> {
    let patch = ContactPatch {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone_number: req.phone_number,
        birthday: req.birthday,
        additional_info: req.additional_info,
    };

    // An empty patch still has to confirm the contact exists
    let row = if patch.is_empty() {
        state
            .repos
            .contacts
            .find_by_id(id, auth_user.user_id.0)
            .await?
    } else {
        state
            .repos
            .contacts
            .update(id, auth_user.user_id.0, patch)
            .await?
    };

    let row = row.ok_or(ApiError::ContactNotFound)?;
    Ok(Json(ContactResponse::from(row)))
}

/// DELETE /contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    state
        .repos
        .contacts
        .delete(id, auth_user.user_id.0)
        .await?
        .ok_or(ApiError::ContactNotFound)?;

    tracing::info!(contact_id = %id, owner_id = %auth_user.user_id, "Contact deleted");

    Ok(Json(DeleteResponse {
        message: "Contact deleted",
    }))
}
