//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email (exact match, no normalization)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Atomically consume a pending verification code
    ///
    /// Clears the stored code and marks the user verified in a single
    /// conditional update. Returns `true` iff the submitted code matched a
    /// pending code on an unverified account; otherwise state is unchanged.
    async fn consume_verification_code(&self, id: Uuid, code: &str) -> DbResult<bool>;

    /// Update the user's avatar URL
    async fn update_avatar_url(&self, id: Uuid, avatar_url: &str) -> DbResult<()>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub verification_code: String,
}

/// Contact repository trait
///
/// Every read, update, and delete is scoped by owner: a contact owned by
/// another user is indistinguishable from a missing one.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List contacts belonging to an owner
    async fn list_by_owner(&self, owner_id: Uuid, skip: i64, limit: i64)
        -> DbResult<Vec<ContactRow>>;

    /// Find a contact by ID, scoped to its owner
    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>>;

    /// Create a new contact
    async fn create(&self, contact: CreateContact) -> DbResult<ContactRow>;

    /// Apply a partial update to a contact, scoped to its owner
    ///
    /// Only fields present in the patch change. Returns the updated row,
    /// or `None` if the contact does not exist for this owner.
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ContactPatch,
    ) -> DbResult<Option<ContactRow>>;

    /// Delete a contact, scoped to its owner
    ///
    /// Returns the deleted row, or `None` if the contact does not exist
    /// for this owner.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<ContactRow>>;
}

/// Create contact input
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub additional_info: Option<String>,
}

/// Partial update for a contact
///
/// Each field is either unset (`None`, leave the stored value unchanged)
/// or set (`Some`, replace it). The owner is immutable and not patchable.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub additional_info: Option<String>,
}

impl ContactPatch {
    /// Apply the patch to a row field by field
    ///
    /// In-memory counterpart of the COALESCE-based SQL update; used by
    /// non-SQL stores and tests.
    pub fn apply(&self, row: &mut ContactRow) {
        if let Some(ref first_name) = self.first_name {
            row.first_name = first_name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            row.last_name = last_name.clone();
        }
        if let Some(ref email) = self.email {
            row.email = email.clone();
        }
        if let Some(ref phone_number) = self.phone_number {
            row.phone_number = phone_number.clone();
        }
        if let Some(birthday) = self.birthday {
            row.birthday = birthday;
        }
        if let Some(ref additional_info) = self.additional_info {
            row.additional_info = Some(additional_info.clone());
        }
    }

    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.birthday.is_none()
            && self.additional_info.is_none()
    }
}
